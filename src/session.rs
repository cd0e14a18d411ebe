// The annotation session as a plain state machine.
// Visual: every command either changes what you see (redraw), writes the
// label file (commit), or closes the window (exit). No window code in here,
// so all of it runs in tests.

use crate::config::Config;
use crate::coords::CoordinateSpace;
use crate::curve::CurveBuilder;
use crate::error::Error;
use crate::export::LabelWriter;
use crate::points::PointStore;
use crate::raster;
use crate::types::{AnchorPoint, Curve, CurveMode, CurveSample};
use image::GrayImage;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// One input, already decoded from the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Click(AnchorPoint), // add a point (working-space pixels)
    Undo,               // drop the newest point
    Commit,             // rasterize and write the label
    ToggleMode,         // linear <-> Bézier
    Exit,               // leave the session
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Editing,
    Closed,
}

/// What the caller should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Nothing,
    Redraw,
    Saved { path: PathBuf, filled: usize },
    Exit,
}

pub struct Session {
    phase: Phase,
    points: PointStore,
    builder: CurveBuilder,
    curve: Curve, // rebuilt from `points` after every change, used by the preview
    space: CoordinateSpace,
    label_path: PathBuf,
    threshold: u8,
    saved: bool, // last command was a successful commit; any edit clears it
}

impl Session {
    pub fn new(space: CoordinateSpace, label_path: PathBuf, config: &Config) -> Self {
        Self {
            phase: Phase::Editing,
            points: PointStore::new(),
            builder: CurveBuilder::new(config.mode, config.linear_density, config.bezier_density),
            curve: Vec::new(),
            space,
            label_path,
            threshold: config.threshold,
            saved: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn anchors(&self) -> &[AnchorPoint] {
        self.points.snapshot()
    }

    pub fn curve(&self) -> &[CurveSample] {
        &self.curve
    }

    pub fn mode(&self) -> CurveMode {
        self.builder.mode
    }

    /// True between a successful commit and the next edit (drives the SAVED status).
    pub fn saved(&self) -> bool {
        self.saved
    }

    pub fn label_path(&self) -> &Path {
        &self.label_path
    }

    /// Fresh native-size mask from the current points (does not touch disk).
    pub fn render_label(&self) -> GrayImage {
        let curve = self.builder.build(self.points.snapshot());
        raster::rasterize(&curve, &self.space, self.threshold)
    }

    fn rebuild(&mut self) {
        self.saved = false;
        self.curve = self.builder.build(self.points.snapshot());
        debug!("Curve rebuilt: {} anchors -> {} samples", self.points.len(), self.curve.len());
    }
}

/// Apply one command. Runs to completion; the loop reads the next event after.
pub fn handle(session: &mut Session, command: Command, writer: &mut dyn LabelWriter) -> Result<Effect, Error> {
    if session.phase == Phase::Closed {
        return Ok(Effect::Nothing);
    }

    match command {
        Command::Click(p) => {
            session.points.append(p);
            let (ox, oy) = session.space.to_original(p.x, p.y);
            debug!("Point added at ({}, {}), native ({}, {})", p.x, p.y, ox, oy);
            session.rebuild();
            Ok(Effect::Redraw)
        }
        Command::Undo => {
            if session.points.is_empty() {
                warn!("Nothing to undo");
                return Ok(Effect::Nothing);
            }
            if let Some(p) = session.points.remove_last() {
                debug!("Point removed at ({}, {})", p.x, p.y);
            }
            session.rebuild();
            Ok(Effect::Redraw)
        }
        Command::ToggleMode => {
            session.builder.mode = session.builder.mode.toggled();
            info!("Curve mode: {:?}", session.builder.mode);
            session.rebuild();
            Ok(Effect::Redraw)
        }
        Command::Commit => {
            // Points stay as they are; the operator may refine and commit again.
            let mask = session.render_label();
            let filled = raster::filled_count(&mask);
            writer.write_label(&session.label_path, &mask)?;
            session.saved = true;
            info!(
                "Label saved: {} ({}x{}, {} px filled)",
                session.label_path.display(),
                mask.width(),
                mask.height(),
                filled
            );
            Ok(Effect::Saved { path: session.label_path.clone(), filled })
        }
        Command::Exit => {
            session.phase = Phase::Closed;
            Ok(Effect::Exit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::PngWriter;
    use std::fs;

    /// Keeps masks in memory instead of writing files.
    #[derive(Default)]
    struct Captured {
        writes: Vec<(PathBuf, GrayImage)>,
    }

    impl LabelWriter for Captured {
        fn write_label(&mut self, path: &Path, mask: &GrayImage) -> Result<(), Error> {
            self.writes.push((path.to_path_buf(), mask.clone()));
            Ok(())
        }
    }

    struct Failing;

    impl LabelWriter for Failing {
        fn write_label(&mut self, path: &Path, _mask: &GrayImage) -> Result<(), Error> {
            Err(Error::Save(format!("read-only: {}", path.display())))
        }
    }

    fn session(native: (u32, u32), mode: CurveMode) -> Session {
        let config = Config { mode, ..Config::default() };
        let space = CoordinateSpace::new(native, (config.working_width, config.working_height));
        Session::new(space, PathBuf::from("img_label.png"), &config)
    }

    fn click_all(s: &mut Session, w: &mut dyn LabelWriter, pts: &[(i32, i32)]) {
        for &(x, y) in pts {
            assert_eq!(handle(s, Command::Click(AnchorPoint::new(x, y)), w).unwrap(), Effect::Redraw);
        }
    }

    const SQUARE: [(i32, i32); 4] = [(100, 100), (700, 100), (700, 700), (100, 700)];

    #[test]
    fn clicks_rebuild_curve() {
        let mut w = Captured::default();
        let mut s = session((1000, 1000), CurveMode::Linear);
        click_all(&mut s, &mut w, &SQUARE[..2]);
        assert_eq!(s.curve().len(), 20);
        click_all(&mut s, &mut w, &SQUARE[2..]);
        assert_eq!(s.anchors().len(), 4);
        assert_eq!(s.curve().len(), 40);
    }

    #[test]
    fn undo_restores_previous_points() {
        let mut w = Captured::default();
        let mut s = session((1000, 1000), CurveMode::Bezier);
        click_all(&mut s, &mut w, &SQUARE[..3]);
        let before = s.anchors().to_vec();
        let curve_before = s.curve().to_vec();

        click_all(&mut s, &mut w, &[(5, 5)]);
        assert_eq!(handle(&mut s, Command::Undo, &mut w).unwrap(), Effect::Redraw);
        assert_eq!(s.anchors(), before.as_slice());
        assert_eq!(s.curve(), curve_before.as_slice());
    }

    #[test]
    fn undo_on_empty_is_noop() {
        let mut w = Captured::default();
        let mut s = session((10, 10), CurveMode::Bezier);
        assert_eq!(handle(&mut s, Command::Undo, &mut w).unwrap(), Effect::Nothing);
        assert_eq!(s.phase(), Phase::Editing);
    }

    #[test]
    fn commit_with_no_points_writes_black_native_mask() {
        let mut w = Captured::default();
        let mut s = session((640, 480), CurveMode::Bezier);
        let effect = handle(&mut s, Command::Commit, &mut w).unwrap();
        assert_eq!(effect, Effect::Saved { path: PathBuf::from("img_label.png"), filled: 0 });
        let (path, mask) = &w.writes[0];
        assert_eq!(path, &PathBuf::from("img_label.png"));
        assert_eq!(mask.dimensions(), (640, 480));
        assert!(mask.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn coincident_pair_commits_empty_mask() {
        let mut w = Captured::default();
        let mut s = session((300, 200), CurveMode::Bezier);
        click_all(&mut s, &mut w, &[(50, 50), (50, 50)]);
        assert!(s.curve().is_empty());
        let effect = handle(&mut s, Command::Commit, &mut w).unwrap();
        assert!(matches!(effect, Effect::Saved { filled: 0, .. }));
        assert_eq!(w.writes[0].1.dimensions(), (300, 200));
    }

    #[test]
    fn commit_keeps_points_and_matches_native_size() {
        let mut w = Captured::default();
        let mut s = session((1000, 1000), CurveMode::Linear);
        click_all(&mut s, &mut w, &SQUARE);
        let effect = handle(&mut s, Command::Commit, &mut w).unwrap();
        let filled = match effect {
            Effect::Saved { filled, .. } => filled,
            other => panic!("expected save, got {other:?}"),
        };
        assert!((filled as f64 - 562_500.0).abs() < 5_625.0, "filled {filled}");
        assert_eq!(s.anchors().len(), 4);
        assert_eq!(w.writes[0].1.dimensions(), (1000, 1000));
    }

    #[test]
    fn repeated_commit_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        let space = CoordinateSpace::new((1280, 720), (800, 800));
        let path = dir.path().join("frame_label.png");
        let mut s = Session::new(space, path.clone(), &config);
        let mut w = PngWriter;
        click_all(&mut s, &mut w, &[(120, 90), (640, 150), (560, 610), (180, 520)]);

        handle(&mut s, Command::Commit, &mut w).unwrap();
        let first = fs::read(&path).unwrap();
        handle(&mut s, Command::Commit, &mut w).unwrap();
        let second = fs::read(&path).unwrap();
        assert_eq!(first, second);

        let saved = image::open(&path).unwrap().to_luma8();
        assert_eq!(saved.dimensions(), (1280, 720));
        assert!(saved.pixels().all(|p| p[0] == 0 || p[0] == 255));
    }

    #[test]
    fn commit_marks_saved_until_next_edit() {
        let mut w = Captured::default();
        let mut s = session((400, 400), CurveMode::Linear);
        click_all(&mut s, &mut w, &SQUARE[..3]);
        assert!(!s.saved());

        handle(&mut s, Command::Commit, &mut w).unwrap();
        assert!(s.saved());
        handle(&mut s, Command::Undo, &mut w).unwrap();
        assert!(!s.saved());

        handle(&mut s, Command::Commit, &mut w).unwrap();
        click_all(&mut s, &mut w, &[(10, 10)]);
        assert!(!s.saved());
    }

    #[test]
    fn failed_commit_is_not_marked_saved() {
        let mut s = session((100, 100), CurveMode::Linear);
        assert!(handle(&mut s, Command::Commit, &mut Failing).is_err());
        assert!(!s.saved());
    }

    #[test]
    fn toggle_mode_keeps_points() {
        let mut w = Captured::default();
        let mut s = session((800, 800), CurveMode::Bezier);
        click_all(&mut s, &mut w, &SQUARE);
        assert_eq!(s.curve().len(), 400);
        assert_eq!(handle(&mut s, Command::ToggleMode, &mut w).unwrap(), Effect::Redraw);
        assert_eq!(s.mode(), CurveMode::Linear);
        assert_eq!(s.curve().len(), 40);
        assert_eq!(s.anchors().len(), 4);
    }

    #[test]
    fn failed_write_surfaces_error_and_keeps_editing() {
        let mut s = session((100, 100), CurveMode::Linear);
        let mut w = Failing;
        click_all(&mut s, &mut w, &SQUARE[..3]);
        assert!(matches!(handle(&mut s, Command::Commit, &mut w), Err(Error::Save(_))));
        assert_eq!(s.phase(), Phase::Editing);
        assert_eq!(s.anchors().len(), 3);
    }

    #[test]
    fn exit_closes_and_ignores_later_commands() {
        let mut w = Captured::default();
        let mut s = session((100, 100), CurveMode::Linear);
        assert_eq!(handle(&mut s, Command::Exit, &mut w).unwrap(), Effect::Exit);
        assert_eq!(s.phase(), Phase::Closed);
        assert_eq!(handle(&mut s, Command::Click(AnchorPoint::new(1, 1)), &mut w).unwrap(), Effect::Nothing);
        assert_eq!(handle(&mut s, Command::Commit, &mut w).unwrap(), Effect::Nothing);
        assert!(s.anchors().is_empty());
        assert!(w.writes.is_empty());
    }
}
