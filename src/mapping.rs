use glam::UVec2;

/// Associates a sheet cell with the upgrade id its tile is saved as
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MappingEntry {
    pub row: u32,
    pub col: u32,
    /// Output file stem, used verbatim
    pub id: &'static str,
}

const fn entry(row: u32, col: u32, id: &'static str) -> MappingEntry {
    MappingEntry { row, col, id }
}

impl MappingEntry {
    /// `(col, row)`, matching `Grid::iter_cells`
    pub fn cell(&self) -> UVec2 {
        return UVec2 {
            x: self.col,
            y: self.row,
        };
    }

    pub fn file_name(&self) -> String {
        return format!("{}.png", self.id);
    }
}

/// A sheet on disk and the tiles cut from it
#[derive(Clone, Copy, Debug)]
pub struct Batch {
    pub sheet: &'static str,
    pub mapping: &'static [MappingEntry],
}

#[rustfmt::skip]
pub const BATCH_1: [MappingEntry; 16] = [
    entry(0, 0, "power-shot"), entry(0, 1, "rapid-fire"), entry(0, 2, "swift-projectiles"), entry(0, 3, "engine-tune"),
    entry(1, 0, "plating"), entry(1, 1, "sidecar"), entry(1, 2, "pierce"), entry(1, 3, "heavy-barrel"),
    entry(2, 0, "rebound"), entry(2, 1, "dash-sparks"), entry(2, 2, "held-charge"), entry(2, 3, "shield-pickup"),
    entry(3, 0, "magnet-coil"), entry(3, 1, "stabilizers"), entry(3, 2, "shrapnel"), entry(3, 3, "kinetic-siphon"),
];

// (3, 2) and (3, 3) are blank on the second sheet
#[rustfmt::skip]
pub const BATCH_2: [MappingEntry; 14] = [
    entry(0, 0, "prism-spread"), entry(0, 1, "momentum-feed"), entry(0, 2, "split-shot"), entry(0, 3, "explosive-impact"),
    entry(1, 0, "chain-arc"), entry(1, 1, "heatseeker"), entry(1, 2, "blood-fuel"), entry(1, 3, "chain-reaction"),
    entry(2, 0, "quantum-tunneling"), entry(2, 1, "berserk-module"), entry(2, 2, "neutron-core"), entry(2, 3, "glass-cannon"),
    entry(3, 0, "singularity-rounds"), entry(3, 1, "bullet-hell"),
];

/// Processed in order, one sheet at a time
pub const BATCHES: [Batch; 2] = [
    Batch {
        sheet: "batch_1.png",
        mapping: &BATCH_1,
    },
    Batch {
        sheet: "batch_2.png",
        mapping: &BATCH_2,
    },
];
