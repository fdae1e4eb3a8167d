#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use flappy_evo::simulation::bird::Bird;
use flappy_evo::simulation::cloud::Cloud;
use flappy_evo::simulation::entity::Entity;
use flappy_evo::simulation::genome::Genome;
use flappy_evo::simulation::locatable::{
    AI_BIRD_Z, CLOUD_Z, Locatable, OPPONENT_Z, PIPE_Z, PLAYER_Z,
};
use flappy_evo::simulation::params::Params;
use flappy_evo::simulation::pipe::{PairGeometry, Pipe};

fn create_test_params() -> Params {
    let mut params = Params::default();
    params.configure(1, 600.0, 500.0);
    params
}

#[test]
fn test_cloud_locatable() {
    let mut cloud = Cloud::new(10.0, 20.0, 100.0, 8.0);

    let bounds = cloud.bounds();
    assert_eq!(bounds.min().x, 10.0);
    assert!((bounds.max().y - 80.0).abs() < 1e-3);
    assert_eq!(cloud.z_index(), CLOUD_Z);

    cloud.update();
    assert_eq!(cloud.x, 6.0);
    assert!(!cloud.is_marked_for_deletion());

    cloud.x = -99.0;
    cloud.update();
    assert!(cloud.is_marked_for_deletion());
}

#[test]
fn test_pipe_locatable() {
    let [mut top, bottom] = Pipe::pair(400.0, PairGeometry::fit(200.0, 120.0, 500.0), 500.0, 150.0, 10.0);

    assert_eq!(top.bounds().min().y, 0.0);
    assert_eq!(top.bounds().max().y, 120.0);
    assert_eq!(bottom.bounds().min().y, 320.0);
    assert_eq!(bottom.bounds().max().y, 500.0);
    assert_eq!(top.z_index(), PIPE_Z);

    top.update();
    assert_eq!(top.xpos, 390.0);
    assert_eq!(top.bounds().max().x, 540.0);
}

#[test]
fn test_bird_locatable() {
    let params = create_test_params();
    let mut bird = Bird::human(&params);
    bird.x = 100.0;

    let bounds = bird.bounds();
    assert_eq!(bounds.min().x, 75.0);
    assert_eq!(bounds.max().x, 125.0);
    assert_eq!(bounds.min().y, 225.0);
    assert_eq!(bird.z_index(), PLAYER_Z);

    bird.update();
    assert_eq!(bird.tick, 1);
    assert!(!bird.is_marked_for_deletion());
}

#[test]
fn test_bird_z_order_by_role() {
    let params = create_test_params();
    assert_eq!(Bird::ai(&params, Genome::zeros(), 0.5).z_index(), AI_BIRD_Z);
    assert_eq!(Bird::opponent(&params, Genome::zeros(), 0.5).z_index(), OPPONENT_Z);
    assert!(CLOUD_Z < PIPE_Z && PIPE_Z < OPPONENT_Z && OPPONENT_Z < PLAYER_Z);
}

#[test]
fn test_locatable_trait_polymorphism() {
    let params = create_test_params();
    let bird = Bird::human(&params);
    let cloud = Cloud::new(0.0, 0.0, 50.0, 8.0);
    let [pipe, _] = Pipe::pair(300.0, PairGeometry::fit(200.0, 100.0, 500.0), 500.0, 150.0, 10.0);

    let items: Vec<&dyn Locatable> = vec![&bird, &cloud, &pipe];

    fn area(item: &dyn Locatable) -> f32 {
        let b = item.bounds();
        b.width() * b.height()
    }

    assert_eq!(area(items[0]), 2500.0);
    assert!((area(items[1]) - 1500.0).abs() < 1e-2);
    assert_eq!(area(items[2]), 15000.0);
}

#[test]
fn test_entity_forwards_to_variant() {
    let params = create_test_params();
    let mut entity = Entity::from(Bird::human(&params));

    assert_eq!(entity.z_index(), PLAYER_Z);
    entity.update();
    assert_eq!(entity.as_bird().unwrap().tick, 1);
    assert!(entity.as_pipe().is_none());
    assert!(entity.as_cloud().is_none());

    let mut cloud = Entity::from(Cloud::new(-200.0, 0.0, 100.0, 8.0));
    cloud.update();
    assert!(cloud.is_marked_for_deletion());
}
