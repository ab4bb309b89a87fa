use super::door_operations::tick_door;
use super::lift_operations::{step_lift, tick_lift};
use super::*;
use crate::config::ConversionConfig;
use crate::convert::{BoundaryColumn, FloorCell, SectorHeights};
use crate::geometry::{column_voxel, SectorPolygon};
use crate::level::Vertex;
use crate::world::core::palette::light_marker;
use crate::world::{
    create_memory_world, get_entity, spawn_entity, total_damage, HostWorld, MaterialId, MemoryWorld, VoxelPos,
};
use cgmath::Point3;
use rustc_hash::FxHashMap;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn config() -> ConversionConfig {
    let mut config = ConversionConfig::default();
    config.transform.units_per_voxel = 64.0;
    config
}

fn square_cells(size: i32) -> Vec<FloorCell> {
    (0..size)
        .flat_map(|dz| (0..size).map(move |dx| FloorCell { dx, dz }))
        .collect()
}

/// Polygon covering columns 0..size at 64 units per voxel
fn square_polygon(size: i16) -> SectorPolygon {
    let s = size * 64;
    SectorPolygon {
        sector: 0,
        vertices: vec![
            Vertex { x: 0, y: 0 },
            Vertex { x: s, y: 0 },
            Vertex { x: s, y: s },
            Vertex { x: 0, y: s },
        ],
        closed: true,
        unused_edges: 0,
    }
}

const SEAM: MaterialId = MaterialId::STONE_BRICK;

/// 2x2 lift resting at `top`, lowering to `bottom`, with one seam column at
/// (2, 0) against a neighbor floor at `bottom` and one on its own cell (0, 0)
fn lift_fixture(world: &mut MemoryWorld, top: i32, bottom: i32, ceiling: i32) -> LiftData {
    let config = config();
    let cells = square_cells(2);
    for cell in &cells {
        world
            .set_voxel(column_voxel(&config.transform, cell.dx, top, cell.dz), config.palette.floor)
            .unwrap();
    }
    let heights = SectorHeights {
        floor_y: top,
        ceiling_y: ceiling,
        raw_ceiling_y: ceiling,
    };
    let boundary = vec![
        BoundaryColumn {
            dx: 2,
            dz: 0,
            neighbor_floor_y: bottom,
            wall_material: SEAM,
        },
        BoundaryColumn {
            dx: 0,
            dz: 0,
            neighbor_floor_y: bottom,
            wall_material: SEAM,
        },
    ];
    let lift = create_lift(
        0,
        cells,
        square_polygon(2),
        &heights,
        bottom,
        config.palette.floor,
        boundary,
        LiftSettings {
            tag: 7,
            speed: SpeedClass::Normal,
        },
    );
    seal_lift_boundary(
        &lift,
        world,
        &config.transform,
        &[config.palette.wall_trim, config.palette.pillar_trim],
    );
    lift
}

fn run_lift_until(lift: &mut LiftData, world: &mut MemoryWorld, config: &ConversionConfig, tick: u64) {
    while world.tick < tick {
        world.tick += 1;
        let now = world.tick;
        tick_lift(lift, world, config, now);
    }
}

fn floor_at(world: &MemoryWorld, dx: i32, y: i32, dz: i32) -> MaterialId {
    world.get_voxel(VoxelPos::new(dx, y, dz))
}

// ============================================================================
// LIFTS
// ============================================================================

#[test]
fn test_lift_cycle_timing() {
    init_logging();
    let config = config();
    let mut world = create_memory_world();
    let mut lift = lift_fixture(&mut world, 4, 0, 12);

    assert_eq!(activate_lift(&mut lift, 0), Some(MoverEvent::LiftLowering { sector: 0 }));

    run_lift_until(&mut lift, &mut world, &config, 7);
    assert_eq!((lift.state, lift.current_y), (LiftState::MovingDown, 1));

    run_lift_until(&mut lift, &mut world, &config, 8);
    assert_eq!((lift.state, lift.current_y), (LiftState::Waiting, 0));
    assert_eq!(lift.wait_until, 68);

    run_lift_until(&mut lift, &mut world, &config, 67);
    assert_eq!(lift.state, LiftState::Waiting);

    run_lift_until(&mut lift, &mut world, &config, 68);
    assert_eq!((lift.state, lift.current_y), (LiftState::MovingUp, 0));

    run_lift_until(&mut lift, &mut world, &config, 75);
    assert_eq!((lift.state, lift.current_y), (LiftState::MovingUp, 3));

    run_lift_until(&mut lift, &mut world, &config, 76);
    assert_eq!((lift.state, lift.current_y), (LiftState::Idle, 4));

    for cell in &lift.cells {
        assert_eq!(floor_at(&world, cell.dx, 4, cell.dz), config.palette.floor);
        let below = floor_at(&world, cell.dx, 0, cell.dz);
        if (cell.dx, cell.dz) == (0, 0) {
            assert_eq!(below, SEAM);
        } else {
            assert!(below.is_air());
        }
    }
}

#[test]
fn test_lift_events() {
    let config = config();
    let mut world = create_memory_world();
    let mut lift = lift_fixture(&mut world, 1, 0, 8);
    activate_lift(&mut lift, 0);

    let mut events = Vec::new();
    for tick in 1..=70 {
        world.tick = tick;
        events.extend(tick_lift(&mut lift, &mut world, &config, tick));
    }
    assert_eq!(
        events,
        vec![
            MoverEvent::LiftReachedBottom { sector: 0 },
            MoverEvent::LiftRising { sector: 0 },
            MoverEvent::LiftReachedTop { sector: 0 },
        ]
    );
}

#[test]
fn test_lift_activate_is_noop_without_travel() {
    let config = config();
    let mut world = create_memory_world();

    let mut level = lift_fixture(&mut world, 3, 3, 8);
    assert_eq!(activate_lift(&mut level, 0), None);

    let mut inverted = lift_fixture(&mut world, 3, 0, 8);
    inverted.bottom_y = 5;
    assert_eq!(activate_lift(&mut inverted, 0), None);

    for tick in 1..=100 {
        world.tick = tick;
        assert!(tick_lift(&mut level, &mut world, &config, tick).is_empty());
        assert!(tick_lift(&mut inverted, &mut world, &config, tick).is_empty());
        assert_eq!(level.state, LiftState::Idle);
        assert_eq!(inverted.state, LiftState::Idle);
    }
}

#[test]
fn test_lift_activate_ignored_while_moving() {
    let mut world = create_memory_world();
    let mut lift = lift_fixture(&mut world, 4, 0, 12);
    assert!(activate_lift(&mut lift, 0).is_some());
    assert_eq!(activate_lift(&mut lift, 1), None);
    assert_eq!(lift.last_step, 0);
}

#[test]
fn test_zero_cell_lift_stays_idle() {
    init_logging();
    let heights = SectorHeights {
        floor_y: 4,
        ceiling_y: 10,
        raw_ceiling_y: 10,
    };
    let mut lift = create_lift(
        3,
        Vec::new(),
        square_polygon(2),
        &heights,
        0,
        MaterialId::SMOOTH_STONE,
        Vec::new(),
        LiftSettings {
            tag: 1,
            speed: SpeedClass::Fast,
        },
    );
    assert_eq!(activate_lift(&mut lift, 0), None);
    assert_eq!(lift.state, LiftState::Idle);
}

#[test]
fn test_boundary_on_own_cells_kept_as_platform_edge() {
    let mut world = create_memory_world();
    let lift = lift_fixture(&mut world, 4, 0, 12);
    assert_eq!(lift.boundary.len(), 1);
    assert_eq!((lift.boundary[0].dx, lift.boundary[0].dz), (2, 0));
    assert_eq!(lift.platform_edge.len(), 1);
    assert_eq!((lift.platform_edge[0].dx, lift.platform_edge[0].dz), (0, 0));
}

#[test]
fn test_platform_edge_seam_stays_below_platform() {
    let config = config();
    let floor = config.palette.floor;
    let mut world = create_memory_world();
    let mut lift = lift_fixture(&mut world, 4, 0, 12);
    let column = |world: &MemoryWorld| -> Vec<MaterialId> { (0..=4).map(|y| floor_at(world, 0, y, 0)).collect() };
    let air = MaterialId::AIR;

    // Sealed at load: the step face under the raised platform
    assert_eq!(column(&world), vec![SEAM, SEAM, SEAM, SEAM, floor]);

    let mut events = Vec::new();
    step_lift(&mut lift, &mut world, &config, -1, &mut events);
    assert_eq!(column(&world), vec![SEAM, SEAM, SEAM, floor, air]);

    for _ in 0..3 {
        step_lift(&mut lift, &mut world, &config, -1, &mut events);
    }
    // Level with the neighbor: no step face left
    assert_eq!(column(&world), vec![floor, air, air, air, air]);

    step_lift(&mut lift, &mut world, &config, 1, &mut events);
    assert_eq!(column(&world), vec![SEAM, floor, air, air, air]);
    for _ in 0..3 {
        step_lift(&mut lift, &mut world, &config, 1, &mut events);
    }
    assert_eq!(column(&world), vec![SEAM, SEAM, SEAM, SEAM, floor]);
}

#[test]
fn test_seal_restores_platform_over_edge_trim() {
    let config = config();
    let mut world = create_memory_world();
    let lift = lift_fixture(&mut world, 4, 0, 12);

    // Wall extrusion left trim on the edge column, platform layer included
    for y in 0..=4 {
        world
            .set_voxel(VoxelPos::new(0, y, 0), config.palette.wall_trim)
            .unwrap();
    }
    seal_lift_boundary(
        &lift,
        &mut world,
        &config.transform,
        &[config.palette.wall_trim, config.palette.pillar_trim],
    );

    assert_eq!(floor_at(&world, 0, 4, 0), config.palette.floor);
    for y in 0..4 {
        assert_eq!(floor_at(&world, 0, y, 0), SEAM);
    }
}

#[test]
fn test_seam_follows_platform() {
    let config = config();
    let mut world = create_memory_world();
    let mut lift = lift_fixture(&mut world, 4, 0, 12);
    let seam = |world: &MemoryWorld| -> Vec<i32> {
        (-1..=6)
            .filter(|&y| floor_at(world, 2, y, 0) == SEAM)
            .collect()
    };

    assert_eq!(seam(&world), vec![0, 1, 2, 3]);

    let mut events = Vec::new();
    step_lift(&mut lift, &mut world, &config, -1, &mut events);
    assert_eq!(seam(&world), vec![0, 1, 2]);

    for _ in 0..3 {
        step_lift(&mut lift, &mut world, &config, -1, &mut events);
    }
    assert_eq!(lift.current_y, 0);
    assert_eq!(seam(&world), vec![0]);

    step_lift(&mut lift, &mut world, &config, 1, &mut events);
    assert_eq!(seam(&world), vec![0]);
    step_lift(&mut lift, &mut world, &config, 1, &mut events);
    assert_eq!(seam(&world), vec![0, 1]);
}

#[test]
fn test_seam_layers_include_neighbor_floor() {
    assert_eq!(seam_layers(4, 0), 0..=3);
    assert_eq!(seam_layers(0, 0), 0..=0);
    assert_eq!(seam_layers(1, 3), 1..=3);
}

#[test]
fn test_platform_edge_seam_layers_stop_under_platform() {
    assert_eq!(platform_edge_seam_layers(4, 0), 0..=3);
    assert!(platform_edge_seam_layers(0, 0).is_empty());
    assert!(platform_edge_seam_layers(1, 3).is_empty());
}

#[test]
fn test_defensive_floor_clear() {
    let config = config();
    let mut world = create_memory_world();
    let mut lift = lift_fixture(&mut world, 4, 0, 12);

    // Host bricks over one platform cell after load
    world.set_voxel(VoxelPos::new(1, 4, 1), MaterialId::STONE).unwrap();

    let mut events = Vec::new();
    step_lift(&mut lift, &mut world, &config, -1, &mut events);

    assert_eq!(floor_at(&world, 1, 4, 1), MaterialId::STONE);
    assert!(floor_at(&world, 0, 4, 0).is_air());
    assert_eq!(floor_at(&world, 1, 3, 1), config.palette.floor);
    assert_eq!(floor_at(&world, 0, 3, 0), config.palette.floor);
}

#[test]
fn test_interior_clear_keeps_light_markers() {
    let config = config();
    let mut world = create_memory_world();
    let mut lift = lift_fixture(&mut world, 4, 0, 12);
    let marker = light_marker(&config.palette, 9);
    world.set_voxel(VoxelPos::new(0, 11, 0), marker).unwrap();
    world.set_voxel(VoxelPos::new(1, 7, 0), config.palette.floor).unwrap();

    let mut events = Vec::new();
    step_lift(&mut lift, &mut world, &config, -1, &mut events);

    assert_eq!(floor_at(&world, 0, 11, 0), marker);
    assert!(floor_at(&world, 1, 7, 0).is_air());
}

#[test]
fn test_entities_carried_down() {
    let config = config();
    let mut world = create_memory_world();
    let mut lift = lift_fixture(&mut world, 4, 0, 12);

    let rider = spawn_entity(&mut world, Point3::new(0.5, 5.0, 1.5), 1.8);
    let airborne = spawn_entity(&mut world, Point3::new(0.5, 6.0, 1.5), 1.8);
    let outside = spawn_entity(&mut world, Point3::new(2.5, 5.0, 0.5), 1.8);

    let mut events = Vec::new();
    step_lift(&mut lift, &mut world, &config, -1, &mut events);

    assert_eq!(get_entity(&world, rider).unwrap().position.y, 4.0);
    assert_eq!(get_entity(&world, airborne).unwrap().position.y, 6.0);
    assert_eq!(get_entity(&world, outside).unwrap().position.y, 5.0);
    assert!(events.is_empty());
}

#[test]
fn test_crush_monotonic_in_penetration() {
    let config = config();
    let mut world = create_memory_world();
    // Platform at 2, ceiling at 6: an entity standing at 3 rising one layer
    // penetrates by (height - 2)
    let mut lift = lift_fixture(&mut world, 2, 0, 6);

    let heights = [1.5_f32, 2.0, 2.2, 2.5, 3.0, 3.5];
    let ids: Vec<_> = heights
        .iter()
        .map(|&h| spawn_entity(&mut world, Point3::new(1.5, 3.0, 0.5), h))
        .collect();

    let mut events = Vec::new();
    step_lift(&mut lift, &mut world, &config, 1, &mut events);

    let mut previous = 0.0;
    for (id, &h) in ids.iter().zip(&heights) {
        let damage = total_damage(&world, *id);
        assert!(damage >= previous, "damage decreased at height {}", h);
        previous = damage;

        let y = get_entity(&world, *id).unwrap().position.y;
        if damage > 0.0 {
            assert_eq!(y, 3.0, "crushed entity of height {} was moved", h);
        } else {
            assert_eq!(y, 4.0);
        }
    }

    assert_eq!(total_damage(&world, ids[2]), 0.0);
    assert_eq!(total_damage(&world, ids[3]), 0.5 * config.movers.crush_damage_per_layer);
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, MoverEvent::EntityCrushed { .. }))
            .count(),
        3
    );
}

#[test]
fn test_ceiling_penetration() {
    assert_eq!(ceiling_penetration(3.0, 2.5, 1, 6), 0.5);
    assert_eq!(ceiling_penetration(3.0, 1.0, 1, 6), -1.0);
}

#[test]
fn test_speed_classes() {
    assert_eq!(ticks_per_layer(SpeedClass::Slow), 4);
    assert_eq!(ticks_per_layer(SpeedClass::Normal), 2);
    assert_eq!(ticks_per_layer(SpeedClass::Fast), 1);
}

#[test]
fn test_halt_forces_idle() {
    let config = config();
    let mut world = create_memory_world();
    let mut lift = lift_fixture(&mut world, 4, 0, 12);
    activate_lift(&mut lift, 0);
    run_lift_until(&mut lift, &mut world, &config, 4);

    let mut mover = Mover::Lift(lift);
    halt_mover(&mut mover);
    let Mover::Lift(lift) = &mover else {
        unreachable!()
    };
    assert_eq!((lift.state, lift.current_y), (LiftState::Idle, 2));
}

// ============================================================================
// DOORS
// ============================================================================

fn door_fixture(
    world: &mut MemoryWorld,
    sector: usize,
    cells: Vec<FloorCell>,
    auto_close: bool,
) -> DoorData {
    let config = config();
    let heights = SectorHeights {
        floor_y: 0,
        ceiling_y: 5,
        raw_ceiling_y: 5,
    };
    create_door(
        world,
        sector,
        cells,
        &heights,
        &config.palette,
        &config.transform,
        DoorSettings {
            tag: 0,
            auto_close,
            close_delay: 30,
        },
    )
    .unwrap()
}

fn row(x0: i32, x1: i32, dz: i32) -> Vec<FloorCell> {
    (x0..x1).map(|dx| FloorCell { dx, dz }).collect()
}

#[test]
fn test_panel_halves() {
    assert_eq!(panel_halves(0, 5), (1..=2, 3..=4));
    assert_eq!(panel_halves(0, 4), (1..=2, 3..=3));
}

#[test]
fn test_door_starts_closed_with_panel() {
    let palette = config().palette;
    let mut world = create_memory_world();
    let door = door_fixture(&mut world, 0, row(0, 2, 0), false);

    assert_eq!(door.state, DoorState::Closed);
    assert_eq!(door.facing, DoorFacing::NorthSouth);
    for dx in 0..2 {
        assert_eq!(floor_at(&world, dx, 1, 0), palette.door_lower);
        assert_eq!(floor_at(&world, dx, 2, 0), palette.door_lower);
        assert_eq!(floor_at(&world, dx, 3, 0), palette.door_upper);
        assert_eq!(floor_at(&world, dx, 4, 0), palette.door_upper);
    }
}

#[test]
fn test_door_toggle_round_trip() {
    let config = config();
    let mut world = create_memory_world();
    let mut door = door_fixture(&mut world, 0, row(0, 2, 0), false);

    assert_eq!(
        toggle_door(&mut door, &mut world, &config.transform, 5),
        MoverEvent::DoorOpened { sector: 0 }
    );
    assert!(panel_is_clear(&door, &world, &config.transform));
    assert_eq!(door.close_at, None);

    assert_eq!(
        toggle_door(&mut door, &mut world, &config.transform, 6),
        MoverEvent::DoorClosed { sector: 0 }
    );
    assert_eq!(floor_at(&world, 1, 4, 0), config.palette.door_upper);
}

#[test]
fn test_door_auto_close() {
    let config = config();
    let mut world = create_memory_world();
    let mut door = door_fixture(&mut world, 0, row(0, 2, 0), true);

    toggle_door(&mut door, &mut world, &config.transform, 10);
    assert_eq!(door.close_at, Some(40));
    assert_eq!(tick_door(&mut door, &mut world, &config.transform, 39), None);
    assert_eq!(
        tick_door(&mut door, &mut world, &config.transform, 40),
        Some(MoverEvent::DoorClosed { sector: 0 })
    );
    assert_eq!(door.state, DoorState::Closed);
    assert_eq!(floor_at(&world, 0, 1, 0), config.palette.door_lower);
}

#[test]
fn test_door_auto_close_skipped_when_bricked() {
    let config = config();
    let mut world = create_memory_world();
    let mut door = door_fixture(&mut world, 0, row(0, 2, 0), true);

    toggle_door(&mut door, &mut world, &config.transform, 0);
    world.set_voxel(VoxelPos::new(1, 2, 0), MaterialId::BRICK).unwrap();

    assert_eq!(
        tick_door(&mut door, &mut world, &config.transform, 30),
        Some(MoverEvent::DoorCloseSkipped { sector: 0 })
    );
    assert_eq!(door.state, DoorState::Open);
    assert_eq!(door.close_at, None);
    assert_eq!(floor_at(&world, 1, 2, 0), MaterialId::BRICK);
    assert!(floor_at(&world, 0, 2, 0).is_air());
}

#[test]
fn test_lockstep_partners() {
    let mut world = create_memory_world();
    let left = door_fixture(&mut world, 0, row(0, 2, 0), false);
    let right = door_fixture(&mut world, 1, row(2, 4, 0), false);
    // Deep, narrow door touching the left door: faces the other axis
    let side = door_fixture(&mut world, 2, vec![FloorCell { dx: 0, dz: 1 }, FloorCell { dx: 0, dz: 2 }], false);
    assert_eq!(side.facing, DoorFacing::EastWest);

    let mut movers = vec![Mover::Door(left), Mover::Door(right), Mover::Door(side)];
    let mut columns = FxHashMap::default();
    for (index, mover) in movers.iter().enumerate() {
        if let Mover::Door(door) = mover {
            register_door_columns(&mut columns, door, index);
        }
    }

    assert_eq!(find_lockstep_partners(&movers, &columns, 0), vec![1]);
    assert_eq!(find_lockstep_partners(&movers, &columns, 2), Vec::<usize>::new());

    // Partners must share the starting state
    if let Mover::Door(door) = &mut movers[1] {
        door.state = DoorState::Open;
    }
    assert!(find_lockstep_partners(&movers, &columns, 0).is_empty());
}

#[test]
fn test_facing_compatibility() {
    assert!(facings_compatible(DoorFacing::NorthSouth, DoorFacing::NorthSouth));
    assert!(facings_compatible(DoorFacing::EastWest, DoorFacing::EastWest));
    assert!(!facings_compatible(DoorFacing::NorthSouth, DoorFacing::EastWest));
}

#[test]
fn test_door_facing_axes() {
    // Wide along X: the panel faces along Z
    assert_eq!(door_facing(&row(0, 3, 0)), DoorFacing::NorthSouth);
    let deep: Vec<FloorCell> = (0..3).map(|dz| FloorCell { dx: 5, dz }).collect();
    assert_eq!(door_facing(&deep), DoorFacing::EastWest);
    // Square and empty footprints fall back to NorthSouth
    assert_eq!(door_facing(&[FloorCell { dx: 0, dz: 0 }]), DoorFacing::NorthSouth);
    assert_eq!(door_facing(&[]), DoorFacing::NorthSouth);
}
