//! Level Simulation - all per-level state in one context object
//!
//! Built once at level load (polygons, raster, walls, sound graph, movers)
//! and dropped at unload. Every voxel or entity change goes through the
//! `HostWorld` handed to each call.

use super::specials::{classify_special, Action, SpecialKind};
use crate::config::ConversionConfig;
use crate::convert::{
    extrude_sector_walls, rasterize_sector, ExtrudedWalls, FloorCell, RasterizedSector,
};
use crate::error::{ConversionError, ConversionResult, ErrorContext, OptionExt};
use crate::geometry::{build_all_polygons, height_to_layer, SectorPolygon};
use crate::level::{
    linedef_sectors, log_level_stats, lowest_neighbor_floor, sectors_with_tag, LevelData,
};
use crate::movers::{
    activate_lift, create_door, create_lift, find_lockstep_partners, halt_mover, mover_tag,
    open_cells, register_door_columns, seal_lift_boundary, tick_mover, toggle_door, DoorData,
    DoorSettings, LiftSettings, Mover, MoverEvent,
};
use crate::physics::EntityId;
use crate::sound::{build_sound_graph, locate_sector_node, reachable_from, SectorSoundGraph};
use crate::world::HostWorld;
use cgmath::Point3;
use rustc_hash::{FxHashMap, FxHashSet};

/// Mover a sector is claimed for during load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MoverPlan {
    Door(DoorSettings),
    Lift(LiftSettings),
}

/// Load-time summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub sectors: usize,
    pub open_polygons: usize,
    pub floor_cells: usize,
    pub wall_voxels: usize,
    pub light_markers: usize,
    pub pillars: usize,
    pub doors: usize,
    pub lifts: usize,
}

/// Everything one loaded level owns
#[derive(Debug, Clone)]
pub struct LevelSimulation {
    config: ConversionConfig,
    level: LevelData,
    rasterized: Vec<RasterizedSector>,
    walls: Vec<ExtrudedWalls>,
    sound_graph: SectorSoundGraph,
    movers: Vec<Mover>,
    movers_by_tag: FxHashMap<u16, Vec<usize>>,
    door_by_sector: FxHashMap<usize, usize>,
    door_columns: FxHashMap<FloorCell, usize>,
    stats: LoadStats,
}

impl LevelSimulation {
    /// Convert a level into the world and set up its movers
    pub fn load(
        level: &LevelData,
        world: &mut dyn HostWorld,
        config: ConversionConfig,
    ) -> ConversionResult<Self> {
        config.validate().map_err(|e| ConversionError::InvalidConfig {
            field: "ConversionConfig".to_string(),
            reason: e.to_string(),
        })?;
        log_level_stats(level);

        let polygons = build_all_polygons(level);
        let plans = plan_movers(level, &config);

        let mut rasterized = Vec::with_capacity(polygons.len());
        for polygon in &polygons {
            let is_door = matches!(plans[polygon.sector], Some(MoverPlan::Door(_)));
            rasterized.push(rasterize_sector(world, level, polygon, &config, is_door)?);
        }

        let mut walls = Vec::with_capacity(rasterized.len());
        for sector in 0..rasterized.len() {
            walls.push(extrude_sector_walls(world, level, sector, &rasterized, &config)?);
        }

        let sound_graph = build_sound_graph(level, &polygons);

        let mut simulation = LevelSimulation {
            config,
            level: level.clone(),
            rasterized,
            walls,
            sound_graph,
            movers: Vec::new(),
            movers_by_tag: FxHashMap::default(),
            door_by_sector: FxHashMap::default(),
            door_columns: FxHashMap::default(),
            stats: LoadStats::default(),
        };

        for (sector, plan) in plans.iter().enumerate() {
            if let Some(plan) = plan {
                simulation.build_mover(world, sector, *plan, &polygons[sector])?;
            }
        }

        simulation.stats = simulation.collect_stats(&polygons);
        let stats = &simulation.stats;
        log::info!(
            "[LevelSimulation::load] {} sectors ({} open polygons), {} floor cells, {} wall voxels, {} lights, {} pillars",
            stats.sectors,
            stats.open_polygons,
            stats.floor_cells,
            stats.wall_voxels,
            stats.light_markers,
            stats.pillars
        );
        log::info!(
            "[LevelSimulation::load] {} doors, {} lifts, {} tags",
            stats.doors,
            stats.lifts,
            simulation.movers_by_tag.len()
        );

        Ok(simulation)
    }

    fn build_mover(
        &mut self,
        world: &mut dyn HostWorld,
        sector: usize,
        plan: MoverPlan,
        polygon: &SectorPolygon,
    ) -> ConversionResult<()> {
        let raster = &self.rasterized[sector];
        let transform = &self.config.transform;
        let cells = open_cells(world, &raster.cells, raster.heights.floor_y, transform);
        let index = self.movers.len();

        let mover = match plan {
            MoverPlan::Door(settings) => {
                let door = create_door(
                    world,
                    sector,
                    cells,
                    &raster.heights,
                    &self.config.palette,
                    transform,
                    settings,
                )?;
                register_door_columns(&mut self.door_columns, &door, index);
                self.door_by_sector.insert(sector, index);
                Mover::Door(door)
            }
            MoverPlan::Lift(settings) => {
                let own_floor = self.level.sectors[sector].floor_height;
                let lowest = lowest_neighbor_floor(&self.level, sector).map_or(own_floor, |f| f.min(own_floor));
                let lift = create_lift(
                    sector,
                    cells,
                    polygon.clone(),
                    &raster.heights,
                    height_to_layer(transform, lowest),
                    raster.floor_material,
                    self.walls[sector].boundary.clone(),
                    settings,
                );
                let palette = &self.config.palette;
                seal_lift_boundary(&lift, world, transform, &[palette.wall_trim, palette.pillar_trim]);
                Mover::Lift(lift)
            }
        };

        let tag = mover_tag(&mover);
        if tag != 0 {
            self.movers_by_tag.entry(tag).or_default().push(index);
        }
        self.movers.push(mover);
        Ok(())
    }

    fn collect_stats(&self, polygons: &[SectorPolygon]) -> LoadStats {
        LoadStats {
            sectors: self.rasterized.len(),
            open_polygons: polygons.iter().filter(|p| !p.closed).count(),
            floor_cells: self.rasterized.iter().map(|r| r.cells.len()).sum(),
            wall_voxels: self.walls.iter().map(|w| w.voxels_painted).sum(),
            light_markers: self.rasterized.iter().map(|r| r.light_markers).sum(),
            pillars: self.rasterized.iter().filter(|r| r.is_pillar).count(),
            doors: self.movers.iter().filter(|m| matches!(m, Mover::Door(_))).count(),
            lifts: self.movers.iter().filter(|m| matches!(m, Mover::Lift(_))).count(),
        }
    }

    // ========================================================================
    // TRIGGERS
    // ========================================================================

    /// Run a trigger action
    pub fn execute(&mut self, action: Action, world: &mut dyn HostWorld) -> ConversionResult<Vec<MoverEvent>> {
        log::debug!("[LevelSimulation::execute] {:?}", action);
        match action {
            Action::ToggleDoor { sector } => self.toggle_door(sector, world),
            Action::ToggleDoorsByTag { tag } => Ok(self.toggle_doors_by_tag(tag, world)),
            Action::ActivateLift { tag } => Ok(self.activate_lifts(tag, world)),
            Action::Teleport { tag, entity } => self.teleport(tag, entity, world),
        }
    }

    /// Action a linedef's special asks for, if any
    ///
    /// Teleport lines need an entity to move; without one they do nothing.
    pub fn linedef_action(&self, linedef: usize, entity: Option<EntityId>) -> ConversionResult<Option<Action>> {
        let line = self
            .level
            .linedefs
            .get(linedef)
            .ok_or(ConversionError::LinedefOutOfRange {
                index: linedef,
                count: self.level.linedefs.len(),
            })?;

        let action = match classify_special(line.special_type) {
            Some(SpecialKind::ManualDoor { .. }) => match linedef_sectors(&self.level, line).1 {
                Some(sector) => Some(Action::ToggleDoor { sector }),
                None => {
                    log::warn!(
                        "[LevelSimulation::linedef_action] Door linedef {} has no sector behind it",
                        linedef
                    );
                    None
                }
            },
            Some(SpecialKind::TaggedDoor { .. }) => Some(Action::ToggleDoorsByTag { tag: line.sector_tag }),
            Some(SpecialKind::Lift { .. }) => Some(Action::ActivateLift { tag: line.sector_tag }),
            Some(SpecialKind::Teleport { .. }) => entity.map(|entity| Action::Teleport {
                tag: line.sector_tag,
                entity,
            }),
            None => None,
        };
        Ok(action)
    }

    /// Use or cross a linedef
    pub fn trigger_linedef(
        &mut self,
        linedef: usize,
        entity: Option<EntityId>,
        world: &mut dyn HostWorld,
    ) -> ConversionResult<Vec<MoverEvent>> {
        match self.linedef_action(linedef, entity)? {
            Some(action) => self.execute(action, world),
            None => Ok(Vec::new()),
        }
    }

    /// Activate every mover carrying `tag`: doors toggle, lifts start
    pub fn activate_tag(&mut self, tag: u16, world: &mut dyn HostWorld) -> Vec<MoverEvent> {
        let mut events = self.toggle_doors_by_tag(tag, world);
        events.extend(self.activate_lifts(tag, world));
        events
    }

    /// Toggle the door in `sector` and its lockstep partners
    pub fn toggle_door(&mut self, sector: usize, world: &mut dyn HostWorld) -> ConversionResult<Vec<MoverEvent>> {
        if sector >= self.rasterized.len() {
            return Err(ConversionError::SectorOutOfRange {
                index: sector,
                count: self.rasterized.len(),
            });
        }
        let Some(&index) = self.door_by_sector.get(&sector) else {
            log::debug!("[LevelSimulation::toggle_door] Sector {} has no door", sector);
            return Ok(Vec::new());
        };
        let mut toggled = FxHashSet::default();
        Ok(self.toggle_door_group(index, world, &mut toggled))
    }

    /// Toggle every door carrying `tag`, each at most once
    pub fn toggle_doors_by_tag(&mut self, tag: u16, world: &mut dyn HostWorld) -> Vec<MoverEvent> {
        let doors: Vec<usize> = self
            .movers_with_tag(tag)
            .iter()
            .copied()
            .filter(|&i| matches!(self.movers[i], Mover::Door(_)))
            .collect();

        let mut toggled = FxHashSet::default();
        let mut events = Vec::new();
        for index in doors {
            if !toggled.contains(&index) {
                events.extend(self.toggle_door_group(index, world, &mut toggled));
            }
        }
        events
    }

    /// Start every idle lift carrying `tag`
    pub fn activate_lifts(&mut self, tag: u16, world: &mut dyn HostWorld) -> Vec<MoverEvent> {
        let now = world.current_tick();
        let indices = self.movers_with_tag(tag).to_vec();
        indices
            .into_iter()
            .filter_map(|i| match &mut self.movers[i] {
                Mover::Lift(lift) => activate_lift(lift, now),
                Mover::Door(_) => None,
            })
            .collect()
    }

    /// Toggle one door plus the partners found before it flips
    fn toggle_door_group(
        &mut self,
        index: usize,
        world: &mut dyn HostWorld,
        toggled: &mut FxHashSet<usize>,
    ) -> Vec<MoverEvent> {
        let now = world.current_tick();
        let partners = find_lockstep_partners(&self.movers, &self.door_columns, index);

        let mut events = Vec::new();
        for i in std::iter::once(index).chain(partners) {
            if !toggled.insert(i) {
                continue;
            }
            if let Mover::Door(door) = &mut self.movers[i] {
                events.push(toggle_door(door, world, &self.config.transform, now));
            }
        }
        events
    }

    /// Move an entity onto the first tagged sector that has any floor
    ///
    /// The destination is the floor cell nearest the sector's cell centroid.
    pub fn teleport(
        &mut self,
        tag: u16,
        entity: EntityId,
        world: &mut dyn HostWorld,
    ) -> ConversionResult<Vec<MoverEvent>> {
        let target = sectors_with_tag(&self.level, tag)
            .into_iter()
            .filter_map(|s| self.rasterized.get(s))
            .find(|r| !r.cells.is_empty());

        let Some(raster) = target else {
            log::warn!("[LevelSimulation::teleport] No tagged sector with floor for tag {}", tag);
            return Ok(Vec::new());
        };

        let n = raster.cells.len() as f32;
        let cx = raster.cells.iter().map(|c| c.dx as f32 + 0.5).sum::<f32>() / n;
        let cz = raster.cells.iter().map(|c| c.dz as f32 + 0.5).sum::<f32>() / n;
        let distance = |c: &FloorCell| {
            let (x, z) = (c.dx as f32 + 0.5 - cx, c.dz as f32 + 0.5 - cz);
            x * x + z * z
        };
        let mut best = raster.cells[0];
        for cell in &raster.cells[1..] {
            if distance(cell) < distance(&best) {
                best = *cell;
            }
        }

        let origin = self.config.transform.voxel_origin;
        let destination = Point3::new(
            (origin.x + best.dx) as f32 + 0.5,
            (raster.heights.floor_y + 1) as f32,
            (origin.z + best.dz) as f32 + 0.5,
        );
        world.set_entity_position(entity, destination).context("teleport")?;

        log::debug!(
            "[LevelSimulation::teleport] Entity {} -> sector {} at {:?}",
            entity,
            raster.sector,
            destination
        );
        Ok(vec![MoverEvent::EntityTeleported {
            sector: raster.sector,
            entity,
        }])
    }

    // ========================================================================
    // TICKING
    // ========================================================================

    /// Advance every mover by one tick
    pub fn tick(&mut self, world: &mut dyn HostWorld) -> Vec<MoverEvent> {
        let now = world.current_tick();
        let mut events = Vec::new();
        for mover in &mut self.movers {
            events.extend(tick_mover(mover, world, &self.config, now));
        }
        events
    }

    /// Force every lift idle and drop pending door closes
    pub fn halt_all(&mut self) {
        for mover in &mut self.movers {
            halt_mover(mover);
        }
        log::info!("[LevelSimulation::halt_all] Halted {} movers", self.movers.len());
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Sectors reachable by sound from `sector`
    pub fn reachable_from(&self, sector: usize) -> ConversionResult<FxHashSet<usize>> {
        if sector >= self.sound_graph.nodes.len() {
            return Err(ConversionError::SectorOutOfRange {
                index: sector,
                count: self.sound_graph.nodes.len(),
            });
        }
        Ok(reachable_from(&self.sound_graph, sector))
    }

    /// Sector containing a map-space point
    pub fn locate_sector(&self, x: f32, y: f32) -> Option<usize> {
        locate_sector_node(&self.sound_graph, x, y)
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }

    pub fn sound_graph(&self) -> &SectorSoundGraph {
        &self.sound_graph
    }

    pub fn rasterized(&self, sector: usize) -> Option<&RasterizedSector> {
        self.rasterized.get(sector)
    }

    pub fn walls(&self, sector: usize) -> Option<&ExtrudedWalls> {
        self.walls.get(sector)
    }

    pub fn movers(&self) -> &[Mover] {
        &self.movers
    }

    pub fn mover(&self, index: usize) -> ConversionResult<&Mover> {
        self.movers
            .get(index)
            .ok_or_conversion(|| ConversionError::MoverNotFound { id: index })
    }

    /// Mover indices carrying `tag`
    pub fn movers_with_tag(&self, tag: u16) -> &[usize] {
        self.movers_by_tag.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn door_in_sector(&self, sector: usize) -> Option<&DoorData> {
        match self.movers.get(*self.door_by_sector.get(&sector)?) {
            Some(Mover::Door(door)) => Some(door),
            _ => None,
        }
    }
}

/// Decide which sectors get a door or a lift; the first special to claim a
/// sector wins
fn plan_movers(level: &LevelData, config: &ConversionConfig) -> Vec<Option<MoverPlan>> {
    let mut plans: Vec<Option<MoverPlan>> = vec![None; level.sectors.len()];
    let close_delay = config.movers.door_close_delay_ticks;

    for (index, line) in level.linedefs.iter().enumerate() {
        let (sectors, plan) = match classify_special(line.special_type) {
            Some(SpecialKind::ManualDoor { auto_close }) => {
                let Some(sector) = linedef_sectors(level, line).1 else {
                    continue;
                };
                let tag = level.sectors[sector].tag;
                let settings = DoorSettings { tag, auto_close, close_delay };
                (vec![sector], MoverPlan::Door(settings))
            }
            Some(SpecialKind::TaggedDoor { auto_close }) => {
                let settings = DoorSettings {
                    tag: line.sector_tag,
                    auto_close,
                    close_delay,
                };
                (sectors_with_tag(level, line.sector_tag), MoverPlan::Door(settings))
            }
            Some(SpecialKind::Lift { speed }) => {
                let settings = LiftSettings {
                    tag: line.sector_tag,
                    speed,
                };
                (sectors_with_tag(level, line.sector_tag), MoverPlan::Lift(settings))
            }
            Some(SpecialKind::Teleport { .. }) | None => continue,
        };

        for sector in sectors {
            match plans[sector] {
                None => plans[sector] = Some(plan),
                Some(existing) if existing != plan => log::warn!(
                    "[LevelSimulation::plan_movers] Linedef {} asks for {:?} on sector {} already claimed as {:?}",
                    index,
                    plan,
                    sector,
                    existing
                ),
                Some(_) => {}
            }
        }
    }

    plans
}
