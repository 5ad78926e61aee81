//! Property-based invariant tests for the slice synchronizer.
//!
//! 1. Every cell of a group shows the group's color
//! 2. Every group shows the base, the accent, or an active-palette color
//! 3. Palette switches remap painted groups positionally
//! 4. Palette switches leave neutral groups untouched
//! 5. Toggling the mode twice restores every observable value
//! 6. Painting the same group twice with the same color restores the accent
//! 7. Reset returns every group to the accent and keeps the rest
//! 8. Rejected operations leave the state unchanged
//! 9. Published snapshots always match the synchronizer

use kaleido_runtime::{
    CellId, Event, GridTopology, GroupId, PaletteCatalog, Session, SliceSynchronizer, Swatch,
};
use kaleido_style::PALETTE_SIZE;
use proptest::prelude::*;

const GROUPS: u32 = 12;
const CELLS: u16 = 6;

#[derive(Debug, Clone)]
enum Op {
    Palette(usize),
    Swatch(Swatch),
    Paint(u32),
    Toggle,
    Reset,
}

fn swatch_strategy() -> impl Strategy<Value = Swatch> {
    prop_oneof![
        (0..PALETTE_SIZE).prop_map(Swatch::Palette),
        Just(Swatch::Base),
        Just(Swatch::Accent),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let palettes = PaletteCatalog::builtin().len();
    prop_oneof![
        1 => (0..palettes).prop_map(Op::Palette),
        1 => swatch_strategy().prop_map(Op::Swatch),
        3 => (0..GROUPS).prop_map(Op::Paint),
        1 => Just(Op::Toggle),
        1 => Just(Op::Reset),
    ]
}

fn fresh(initial: usize) -> SliceSynchronizer {
    SliceSynchronizer::new(
        PaletteCatalog::builtin(),
        GridTopology::uniform(GROUPS, CELLS).unwrap(),
        initial,
    )
    .unwrap()
}

fn apply(sync: &mut SliceSynchronizer, op: &Op) {
    match *op {
        Op::Palette(i) => sync.select_palette(i).unwrap(),
        Op::Swatch(s) => sync.select_swatch(s).unwrap(),
        Op::Paint(g) => sync.paint_slice(GroupId::new(g)).unwrap(),
        Op::Toggle => sync.toggle_mode(),
        Op::Reset => sync.reset(),
    }
}

fn event(op: &Op) -> Event {
    match *op {
        Op::Palette(i) => Event::PaletteChosen(i),
        Op::Swatch(s) => Event::SwatchChosen(s),
        Op::Paint(g) => Event::SliceClicked(GroupId::new(g)),
        Op::Toggle => Event::ModeToggleClicked,
        Op::Reset => Event::ResetRequested,
    }
}

fn arranged(initial: usize, ops: &[Op]) -> SliceSynchronizer {
    let mut sync = fresh(initial);
    for op in ops {
        apply(&mut sync, op);
    }
    sync
}

fn palette_index_strategy() -> impl Strategy<Value = usize> {
    0..PaletteCatalog::builtin().len()
}

proptest! {
    #[test]
    fn mirrored_cells_agree(
        initial in palette_index_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let sync = arranged(initial, &ops);
        for group in sync.topology().groups() {
            let color = sync.group_color(group).unwrap();
            for position in 0..CELLS {
                prop_assert_eq!(sync.cell_color(CellId::new(group, position)), Ok(color));
            }
        }
    }
}

proptest! {
    #[test]
    fn groups_stay_in_palette_or_neutral(
        initial in palette_index_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let sync = arranged(initial, &ops);
        for group in sync.topology().groups() {
            let color = sync.group_color(group).unwrap();
            prop_assert!(
                color == sync.base()
                    || color == sync.accent()
                    || sync.active_palette().contains(color),
                "{} shows {} outside the palette", group, color
            );
        }
    }
}

proptest! {
    #[test]
    fn palette_switch_is_positional(
        from in palette_index_strategy(),
        to in palette_index_strategy(),
        position in 0..PALETTE_SIZE,
        group in 0..GROUPS,
    ) {
        let mut sync = fresh(from);
        let group = GroupId::new(group);
        sync.select_swatch(Swatch::Palette(position)).unwrap();
        sync.paint_slice(group).unwrap();
        sync.select_palette(to).unwrap();
        prop_assert_eq!(
            sync.group_color(group),
            Ok(sync.catalog().get(to).unwrap().colors()[position])
        );
        prop_assert_eq!(sync.selected_color(), sync.active_palette().colors()[0]);
    }
}

proptest! {
    #[test]
    fn palette_switch_keeps_neutral_groups(
        initial in palette_index_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..30),
        to in palette_index_strategy(),
    ) {
        let mut sync = arranged(initial, &ops);
        let before: Vec<_> = sync
            .topology()
            .groups()
            .map(|g| (g, sync.group_swatch(g).unwrap(), sync.group_color(g).unwrap()))
            .collect();
        sync.select_palette(to).unwrap();
        for (group, slot, color) in before {
            if slot.neutral().is_some() {
                prop_assert_eq!(sync.group_color(group), Ok(color));
            }
        }
    }
}

proptest! {
    #[test]
    fn toggle_twice_is_identity(
        initial in palette_index_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let mut sync = arranged(initial, &ops);
        let before = sync.snapshot();
        sync.toggle_mode();
        prop_assert_ne!(sync.mode(), before.mode);
        sync.toggle_mode();
        prop_assert_eq!(sync.snapshot(), before);
    }
}

proptest! {
    #[test]
    fn paint_twice_restores_accent(
        initial in palette_index_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..30),
        swatch in swatch_strategy(),
        group in 0..GROUPS,
    ) {
        let mut sync = arranged(initial, &ops);
        let group = GroupId::new(group);
        sync.select_swatch(swatch).unwrap();
        if sync.group_color(group) == Ok(sync.selected_color()) {
            sync.paint_slice(group).unwrap();
        }
        sync.paint_slice(group).unwrap();
        prop_assert_eq!(sync.group_color(group), Ok(sync.selected_color()));
        sync.paint_slice(group).unwrap();
        prop_assert_eq!(sync.group_color(group), Ok(sync.accent()));
    }
}

proptest! {
    #[test]
    fn reset_clears_groups_only(
        initial in palette_index_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let mut sync = arranged(initial, &ops);
        let palette = sync.active_palette_index();
        let mode = sync.mode();
        let selected = sync.selected_color();
        sync.reset();
        for group in sync.topology().groups() {
            prop_assert_eq!(sync.group_color(group), Ok(sync.accent()));
        }
        prop_assert_eq!(sync.active_palette_index(), palette);
        prop_assert_eq!(sync.mode(), mode);
        prop_assert_eq!(sync.selected_color(), selected);
    }
}

proptest! {
    #[test]
    fn rejected_operations_change_nothing(
        initial in palette_index_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..30),
        bad_group in GROUPS..GROUPS + 100,
        bad_palette in 11usize..1000,
        bad_position in PALETTE_SIZE..100,
    ) {
        let mut sync = arranged(initial, &ops);
        let before = sync.snapshot();
        prop_assert!(sync.paint_slice(GroupId::new(bad_group)).is_err());
        prop_assert!(sync.select_palette(bad_palette).is_err());
        prop_assert!(sync.select_swatch(Swatch::Palette(bad_position)).is_err());
        prop_assert!(sync.select_palette_named("no such palette").is_err());
        prop_assert_eq!(sync.snapshot(), before);
    }
}

proptest! {
    #[test]
    fn session_snapshots_track_state(
        initial in palette_index_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let mut session = Session::new(fresh(initial));
        let cell = session.snapshots();
        let mut last_version = cell.version();
        for op in &ops {
            session.dispatch(event(op)).unwrap();
            prop_assert_eq!(cell.get(), session.synchronizer().snapshot());
            let version = cell.version();
            prop_assert!(version == last_version || version == last_version + 1);
            last_version = version;
        }
    }
}
