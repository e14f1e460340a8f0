//! Property-based tests for the layer store and the persisted blob.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use yearplan_core::palette::{ALL_COLOR_TEXTURE_CODES, PALETTE};
use yearplan_core::persistence::{decode_str, export, load_state, save_state};
use yearplan_core::{CalendarState, DateCellData, DayKey, LayerData, MemoryStorage, TextOverflow};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

#[derive(Debug, Clone)]
enum LayerOp {
    Add(String, usize),
    Remove(usize),
    Activate(usize),
}

fn layer_op() -> impl Strategy<Value = LayerOp> {
    prop_oneof![
        ("[ a-z]{0,8}", 0..PALETTE.len()).prop_map(|(name, color)| LayerOp::Add(name, color)),
        (0usize..10).prop_map(LayerOp::Remove),
        (0usize..10).prop_map(LayerOp::Activate),
    ]
}

fn day_key() -> impl Strategy<Value = DayKey> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0u64..731).prop_map(move |offset| DayKey::new(start + Days::new(offset)))
}

fn overflow() -> impl Strategy<Value = Option<TextOverflow>> {
    prop_oneof![
        Just(None),
        Just(Some(TextOverflow::OverflowX)),
        Just(Some(TextOverflow::OverflowY)),
        Just(Some(TextOverflow::NoOverflow)),
    ]
}

fn cell() -> impl Strategy<Value = DateCellData> {
    (
        proptest::option::of(0..ALL_COLOR_TEXTURE_CODES.len()),
        proptest::option::of("[A-Za-z][A-Za-z0-9 ]{0,15}"),
        overflow(),
    )
        .prop_map(|(code, text, overflow)| DateCellData {
            color_texture: code.map(|i| ALL_COLOR_TEXTURE_CODES[i]),
            text_overflow_direction: text.as_ref().and(overflow),
            text,
        })
}

fn layer_data() -> impl Strategy<Value = LayerData> {
    proptest::collection::vec((day_key(), cell()), 0..40).prop_map(|cells| cells.into_iter().collect())
}

fn apply(state: &mut CalendarState, op: &LayerOp) {
    let pick = |state: &CalendarState, i: usize| state.layers()[i % state.layers().len()].id.clone();
    match op {
        LayerOp::Add(name, color) => {
            state.add_layer(name, PALETTE[*color]);
        }
        LayerOp::Remove(i) => {
            let id = pick(state, *i);
            state.remove_layer(&id);
        }
        LayerOp::Activate(i) => {
            let id = pick(state, *i);
            state.set_active_layer_id(&id);
        }
    }
}

proptest! {
    /// The store always has a layer and the active id always names one.
    #[test]
    fn prop_layers_never_empty(ops in proptest::collection::vec(layer_op(), 0..40)) {
        let mut state = CalendarState::new(2025);
        for op in &ops {
            apply(&mut state, op);
            prop_assert!(!state.layers().is_empty());
            let active = state.active_layer_id();
            prop_assert!(state.layers().iter().any(|l| &l.id == active));
            prop_assert!(state.layer_cells(active).is_some());
        }
    }

    /// Cells survive a save and reload unchanged.
    #[test]
    fn prop_layer_data_roundtrip(data in layer_data(), second in layer_data()) {
        let mut state = CalendarState::new(2025);
        state.set_active_layer_cells(data);
        state.add_layer("Second", PALETTE[3]);
        state.set_active_layer_cells(second);

        let mut storage = MemoryStorage::new();
        save_state(&mut storage, &state);
        let loaded = load_state(&storage, today());

        prop_assert_eq!(loaded, state);
    }

    /// Exporting a loaded blob and loading the export gives the same state.
    #[test]
    fn prop_export_reload_is_identity(data in layer_data(), ops in proptest::collection::vec(layer_op(), 0..10)) {
        let mut state = CalendarState::new(2026);
        for op in &ops {
            apply(&mut state, op);
        }
        state.set_active_layer_cells(data);

        let mut storage = MemoryStorage::new();
        save_state(&mut storage, &state);
        let loaded = load_state(&storage, today());

        let exported = export(&loaded, chrono::Utc::now()).unwrap();
        prop_assert!(decode_str(&exported.contents).is_ok());

        let mut storage = MemoryStorage::new();
        yearplan_core::Storage::set(&mut storage, yearplan_core::constants::STORAGE_KEY, &exported.contents).unwrap();
        prop_assert_eq!(load_state(&storage, today()), loaded);
    }
}
