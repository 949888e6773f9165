use super::hip_models::HipModel;
use super::tile_models::TileModel;

/// Roof covering laid on a grid over each pitch.
#[derive(Debug, Clone, Copy)]
pub struct TileParams {
    pub enable: bool,
    pub model: TileModel,
    /// Tile footprint along the eave, down the slope, and thickness.
    pub size_x: f64,
    pub size_y: f64,
    pub size_z: f64,
    /// Grid spacing along the eave and down the slope.
    pub space_x: f64,
    pub space_y: f64,
    /// Stretch the spacing so a whole number of tiles fits.
    pub fit_x: bool,
    pub fit_y: bool,
    /// Shift every other row by half a tile.
    pub alternate: bool,
    /// Start offset of each row, in percent of a tile.
    pub offset: f64,
    pub altitude: f64,
    /// Overhang past the gable sides.
    pub side: f64,
    /// Gap left open along valleys.
    pub couloir: f64,
    /// Overhang past the eave.
    pub border: f64,
}

impl Default for TileParams {
    fn default() -> Self {
        Self {
            enable: true,
            model: TileModel::Braas2,
            size_x: 0.2,
            size_y: 0.3,
            size_z: 0.02,
            space_x: 0.2,
            space_y: 0.3,
            fit_x: true,
            fit_y: true,
            alternate: false,
            offset: 0.0,
            altitude: 0.1,
            side: 0.0,
            couloir: 0.05,
            border: 0.0,
        }
    }
}

/// Hip, ridge and valley finishing.
#[derive(Debug, Clone, Copy)]
pub struct HipParams {
    pub enable: bool,
    pub model: HipModel,
    pub altitude: f64,
    /// Distance between two hip tiles.
    pub space_x: f64,
    pub size_x: f64,
    pub size_y: f64,
    pub size_z: f64,
    pub valley_enable: bool,
    pub valley_altitude: f64,
}

impl Default for HipParams {
    fn default() -> Self {
        Self {
            enable: true,
            model: HipModel::Round,
            altitude: 0.1,
            space_x: 0.4,
            size_x: 0.4,
            size_y: 0.15,
            size_z: 0.15,
            valley_enable: true,
            valley_altitude: 0.1,
        }
    }
}

/// Half round gutter hanging along the eaves.
#[derive(Debug, Clone, Copy)]
pub struct GutterParams {
    pub enable: bool,
    pub altitude: f64,
    pub width: f64,
    /// Gap between the eave and the gutter.
    pub dist: f64,
    /// Diameter of the rolled outer lip.
    pub boudin: f64,
    /// Number of vertices along the channel and along the lip.
    pub segs: usize,
}

impl Default for GutterParams {
    fn default() -> Self {
        Self {
            enable: true,
            altitude: 0.0,
            width: 0.15,
            dist: 0.05,
            boudin: 0.015,
            segs: 6,
        }
    }
}

/// Board nailed along the eaves.
#[derive(Debug, Clone, Copy)]
pub struct FasciaParams {
    pub enable: bool,
    pub height: f64,
    pub width: f64,
    pub offset: f64,
    pub altitude: f64,
}

impl Default for FasciaParams {
    fn default() -> Self {
        Self {
            enable: true,
            height: 0.3,
            width: 0.02,
            offset: 0.0,
            altitude: 0.1,
        }
    }
}

/// Board along the gable sides.
#[derive(Debug, Clone, Copy)]
pub struct BargeboardParams {
    pub enable: bool,
    pub height: f64,
    pub width: f64,
    pub offset: f64,
    pub altitude: f64,
}

impl Default for BargeboardParams {
    fn default() -> Self {
        Self {
            enable: true,
            height: 0.3,
            width: 0.02,
            offset: 0.001,
            altitude: 0.1,
        }
    }
}

/// Ridge beam, and the secondary beams under shared edges.
#[derive(Debug, Clone, Copy)]
pub struct BeamParams {
    pub enable: bool,
    pub width: f64,
    pub height: f64,
    /// Overhang past the gable sides.
    pub offset: f64,
    pub altitude: f64,
    pub sec_enable: bool,
    pub sec_width: f64,
    pub sec_height: f64,
    pub sec_altitude: f64,
}

impl Default for BeamParams {
    fn default() -> Self {
        Self {
            enable: true,
            width: 0.2,
            height: 0.35,
            offset: 0.02,
            altitude: -0.15,
            sec_enable: true,
            sec_width: 0.15,
            sec_height: 0.2,
            sec_altitude: -0.1,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RafterParams {
    pub enable: bool,
    pub width: f64,
    pub height: f64,
    pub spacing: f64,
    /// Distance from the pitch start to the first rafter axis.
    pub start: f64,
    pub altitude: f64,
}

impl Default for RafterParams {
    fn default() -> Self {
        Self {
            enable: true,
            width: 0.1,
            height: 0.2,
            spacing: 0.7,
            start: 0.1,
            altitude: -0.001,
        }
    }
}

/// Under-roof panelling following each pitch surface.
#[derive(Debug, Clone, Copy)]
pub struct LambrisParams {
    pub enable: bool,
    pub altitude: f64,
}

impl Default for LambrisParams {
    fn default() -> Self {
        Self {
            enable: true,
            altitude: 0.0,
        }
    }
}

/// Every element emitter setting, as used by [`super::EmitRoof`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EmitSettings {
    pub tiles: TileParams,
    pub hips: HipParams,
    pub gutter: GutterParams,
    pub fascia: FasciaParams,
    pub bargeboard: BargeboardParams,
    pub beam: BeamParams,
    pub rafter: RafterParams,
    pub lambris: LambrisParams,
}
