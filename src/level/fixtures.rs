//! Synthetic levels shared by the unit tests

use super::level_data::{LevelData, Linedef, Sector, Sidedef, Vertex};
use crate::constants::level::{ML_BLOCKING, ML_TWO_SIDED, NO_SIDEDEF};

/// One room of a row built by `rooms_in_row`
#[derive(Debug, Clone, Copy)]
pub struct RoomSpec {
    pub width: i16,
    pub floor: i16,
    pub ceiling: i16,
    pub light: u8,
    pub tag: u16,
}

pub fn room(width: i16, floor: i16, ceiling: i16) -> RoomSpec {
    RoomSpec {
        width,
        floor,
        ceiling,
        light: 160,
        tag: 0,
    }
}

/// Index of the linedef shared by room `i` and room `i + 1`
pub fn shared_line_index(room_count: usize, i: usize) -> usize {
    2 * room_count + 2 + i
}

/// Shared linedef of `two_rooms`
pub const TWO_ROOMS_SHARED_LINE: usize = 6;

fn sector(spec: &RoomSpec) -> Sector {
    Sector {
        floor_height: spec.floor,
        ceiling_height: spec.ceiling,
        floor_texture: "FLOOR4_8".to_string(),
        ceiling_texture: "CEIL3_5".to_string(),
        light_level: spec.light,
        sector_type: 0,
        tag: spec.tag,
    }
}

fn side(sector: usize, upper: &str, lower: &str, middle: &str) -> Sidedef {
    Sidedef {
        x_offset: 0,
        y_offset: 0,
        upper_texture: upper.to_string(),
        lower_texture: lower.to_string(),
        middle_texture: middle.to_string(),
        sector: sector as i32,
    }
}

fn push_one_sided(level: &mut LevelData, start: usize, end: usize, sector: usize) {
    level.sidedefs.push(side(sector, "-", "-", "STARTAN3"));
    level.linedefs.push(Linedef {
        start_vertex: start,
        end_vertex: end,
        flags: ML_BLOCKING,
        special_type: 0,
        sector_tag: 0,
        right_sidedef: level.sidedefs.len() as i32 - 1,
        left_sidedef: NO_SIDEDEF,
    });
}

/// Axis-aligned rooms side by side along +x, all `depth` units deep
///
/// Vertex k of the bottom row sits at index k, vertex k of the top row at
/// `n + 1 + k`. Linedefs: bottom and top edge of every room, then the outer
/// left and right walls, then the shared walls (right side = room i, left
/// side = room i + 1).
pub fn rooms_in_row(x0: i16, y0: i16, depth: i16, rooms: &[RoomSpec]) -> LevelData {
    let n = rooms.len();
    let mut level = LevelData::default();

    let mut xs = vec![x0];
    for spec in rooms {
        let last = *xs.last().unwrap_or(&x0);
        xs.push(last + spec.width);
    }
    for &x in &xs {
        level.vertices.push(Vertex { x, y: y0 });
    }
    for &x in &xs {
        level.vertices.push(Vertex { x, y: y0 + depth });
    }
    let bottom = |k: usize| k;
    let top = |k: usize| n + 1 + k;

    level.sectors = rooms.iter().map(sector).collect();

    for i in 0..n {
        push_one_sided(&mut level, bottom(i), bottom(i + 1), i);
        push_one_sided(&mut level, top(i + 1), top(i), i);
    }
    push_one_sided(&mut level, top(0), bottom(0), 0);
    push_one_sided(&mut level, bottom(n), top(n), n - 1);

    for i in 0..n.saturating_sub(1) {
        level.sidedefs.push(side(i, "UPPER1", "LOWER1", "-"));
        level.sidedefs.push(side(i + 1, "UPPER1", "LOWER1", "-"));
        let right = level.sidedefs.len() as i32 - 2;
        level.linedefs.push(Linedef {
            start_vertex: bottom(i + 1),
            end_vertex: top(i + 1),
            flags: ML_TWO_SIDED,
            special_type: 0,
            sector_tag: 0,
            right_sidedef: right,
            left_sidedef: right + 1,
        });
    }

    level
}

/// Single rectangular room
pub fn single_room(x0: i16, y0: i16, x1: i16, y1: i16, floor: i16, ceiling: i16) -> LevelData {
    rooms_in_row(x0, y0, y1 - y0, &[room(x1 - x0, floor, ceiling)])
}

/// Two 256x256 rooms sharing the wall at x = 256
pub fn two_rooms(floor_a: i16, floor_b: i16, ceiling: i16) -> LevelData {
    rooms_in_row(
        0,
        0,
        256,
        &[room(256, floor_a, ceiling), room(256, floor_b, ceiling)],
    )
}
