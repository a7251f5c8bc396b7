use glam::Vec2;
use std::f32::consts::TAU;
use voxelbox_common::BlockType;

/// Pie-menu block picker.
///
/// Sectors are equal slices of the full circle, one per block type, starting
/// at angle 0 (pointing right) and running clockwise on screen. The last
/// highlighted sector is remembered across openings.
#[derive(Debug, Clone, Default)]
pub struct RadialSelector {
    open: bool,
    highlighted: usize,
}

impl RadialSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Highlight the sector under a touch at `offset` from the menu centre.
    pub fn track(&mut self, offset: Vec2) {
        if self.open {
            self.highlighted = sector_for(offset, BlockType::COUNT);
        }
    }

    pub fn highlighted(&self) -> BlockType {
        BlockType::ALL[self.highlighted]
    }

    /// Close the menu and return the chosen block.
    pub fn commit(&mut self) -> BlockType {
        self.open = false;
        self.highlighted()
    }
}

/// Angular width of one sector.
pub fn sector_angle(sectors: usize) -> f32 {
    TAU / sectors.max(1) as f32
}

/// Sector index for a screen-space offset from the centre.
pub fn sector_for(offset: Vec2, sectors: usize) -> usize {
    let sectors = sectors.max(1);
    let mut angle = offset.y.atan2(offset.x);
    if angle < 0.0 {
        angle += TAU;
    }
    ((angle / sector_angle(sectors)).floor() as usize).min(sectors - 1)
}

/// Start and end angle of sector `index`.
pub fn sector_span(index: usize, sectors: usize) -> (f32, f32) {
    let seg = sector_angle(sectors);
    let start = index as f32 * seg;
    (start, start + seg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_selects_sector() {
        // Screen y grows downward, so +y is clockwise from +x.
        assert_eq!(sector_for(Vec2::new(1.0, 0.1), 6), 0);
        assert_eq!(sector_for(Vec2::new(0.0, 1.0), 6), 1);
        assert_eq!(sector_for(Vec2::new(-1.0, 0.1), 6), 2);
        assert_eq!(sector_for(Vec2::new(-1.0, -0.1), 6), 3);
        assert_eq!(sector_for(Vec2::new(0.0, -1.0), 6), 4);
        assert_eq!(sector_for(Vec2::new(1.0, -0.1), 6), 5);
    }

    #[test]
    fn sector_never_exceeds_count() {
        for i in 0..720 {
            let a = i as f32 * TAU / 720.0;
            assert!(sector_for(Vec2::new(a.cos(), a.sin()), 6) < 6);
        }
    }

    #[test]
    fn commit_returns_highlight_and_closes() {
        let mut r = RadialSelector::new();
        r.open();
        r.track(Vec2::new(-10.0, -1.0));
        assert_eq!(r.highlighted(), BlockType::Wood);
        assert_eq!(r.commit(), BlockType::Wood);
        assert!(!r.is_open());
        // remembered on reopen
        r.open();
        assert_eq!(r.highlighted(), BlockType::Wood);
    }

    #[test]
    fn tracking_while_closed_is_ignored() {
        let mut r = RadialSelector::new();
        r.track(Vec2::new(0.0, -1.0));
        assert_eq!(r.highlighted(), BlockType::Grass);
    }

    #[test]
    fn spans_cover_circle() {
        let (s, _) = sector_span(0, 6);
        let (_, e) = sector_span(5, 6);
        assert_eq!(s, 0.0);
        assert!((e - TAU).abs() < 1e-5);
    }
}
