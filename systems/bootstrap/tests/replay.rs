use pursuit_maze_core::{ActivationOrder, CellCoord, Command, EntityId, Event};
use pursuit_maze_system_bootstrap::{launch, Launch, Scenario};
use pursuit_maze_system_pathfinding::find_path;
use pursuit_maze_world::{self as world, query};

/// Extra pursuers spread around the reference maze, all chasing the target.
const EXTRA_STARTS: [CellCoord; 3] = [
    CellCoord::new(15, 1),
    CellCoord::new(1, 12),
    CellCoord::new(15, 12),
];

fn crowded_launch(activation: ActivationOrder) -> (Launch, Vec<EntityId>) {
    let scenario = Scenario::reference().with_activation(activation);
    let mut launch = launch(&scenario).expect("reference boots");

    let mut pursuers = vec![launch.pursuer];
    for start in EXTRA_STARTS {
        let route = find_path(query::grid(&launch.world), start, scenario.target).expect("route");
        let id = launch
            .world
            .spawn_pursuer(start, route)
            .expect("pursuer spawned");
        pursuers.push(id);
    }

    (launch, pursuers)
}

fn run(activation: ActivationOrder, ticks: usize) -> Vec<Event> {
    let (mut launch, _) = crowded_launch(activation);
    let mut log = Vec::new();
    for _ in 0..ticks {
        world::apply(&mut launch.world, Command::Tick, &mut log);
    }
    log
}

fn movers_per_tick(log: &[Event]) -> Vec<Vec<EntityId>> {
    let mut ticks = Vec::new();
    for event in log {
        match event {
            Event::TimeAdvanced { .. } => ticks.push(Vec::new()),
            Event::EntityMoved { entity, .. } => {
                if let Some(current) = ticks.last_mut() {
                    current.push(*entity);
                }
            }
            _ => {}
        }
    }
    ticks
}

#[test]
fn registration_order_replays_identically() {
    assert_eq!(
        run(ActivationOrder::Registration, 30),
        run(ActivationOrder::Registration, 30)
    );
}

#[test]
fn seeded_shuffle_replays_identically() {
    let order = ActivationOrder::Shuffled { seed: 8522 };
    assert_eq!(run(order, 30), run(order, 30));
}

#[test]
fn registration_order_moves_pursuers_by_id() {
    let log = run(ActivationOrder::Registration, 1);
    let (_, pursuers) = crowded_launch(ActivationOrder::Registration);

    assert_eq!(movers_per_tick(&log), vec![pursuers]);
}

#[test]
fn seeded_shuffle_varies_order_across_ticks() {
    let log = run(ActivationOrder::Shuffled { seed: 8522 }, 10);
    let orders = movers_per_tick(&log);

    assert_eq!(orders.len(), 10);
    assert!(orders.iter().all(|movers| movers.len() == 4));
    assert!(orders.windows(2).any(|pair| pair[0] != pair[1]));
}

#[test]
fn every_policy_brings_all_pursuers_to_the_target() {
    let policies = [
        ActivationOrder::Registration,
        ActivationOrder::Shuffled { seed: 1 },
        ActivationOrder::Shuffled { seed: 8522 },
    ];

    for policy in policies {
        let (mut launch, pursuers) = crowded_launch(policy);
        while !query::is_settled(&launch.world) {
            launch.world.tick();
        }

        for id in pursuers {
            assert_eq!(
                query::position(&launch.world, id),
                Some(CellCoord::new(9, 6)),
                "{id} under {policy:?}"
            );
        }
    }
}
