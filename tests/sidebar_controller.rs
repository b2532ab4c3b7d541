//! End-to-end behaviour of the sidebar controller against an in-memory store.

use chrono::{TimeZone, Utc};

use notebar::note::grouping::{Category, GroupedNotes};
use notebar::note::Note;
use notebar::pins::PinnedSet;
use notebar::search::{NoteSearch, SearchProvider};
use notebar::sidebar::{
    InputOutcome, QueryEdit, SidebarContext, SidebarController, SidebarEffects, SidebarInput,
    SidebarView,
};
use notebar::store::{MemoryNoteStore, NoteStore, StoreError};

/// Session double: real in-memory store, a pinned set and a log of navigations.
struct Harness {
    store: MemoryNoteStore,
    notes: Vec<Note>,
    pinned: PinnedSet,
    navigated: Vec<String>,
}

impl Harness {
    fn new(notes: Vec<Note>) -> Self {
        Self {
            store: MemoryNoteStore::new(notes.clone()),
            notes,
            pinned: PinnedSet::new(),
            navigated: Vec::new(),
        }
    }

    /// What the owning scope does after a mutation: pick up the new collection.
    fn reload(&mut self) {
        self.notes = self.store.load().unwrap();
        let notes = &self.notes;
        self.pinned.retain(|slug| notes.iter().any(|n| n.slug == slug));
    }
}

/// Effects half of the harness, borrowed separately from `notes`.
struct Effects<'a> {
    store: &'a mut MemoryNoteStore,
    pinned: &'a mut PinnedSet,
    navigated: &'a mut Vec<String>,
}

impl SidebarEffects for Effects<'_> {
    type Error = StoreError;

    fn toggle_pin(&mut self, slug: &str) -> Result<(), StoreError> {
        self.pinned.toggle(slug);
        Ok(())
    }

    fn add_pinned(&mut self, slug: &str) -> Result<(), StoreError> {
        self.pinned.insert(slug);
        Ok(())
    }

    fn delete_note(&mut self, note: &Note) -> Result<(), StoreError> {
        self.store.delete_note(note)
    }

    fn create_note(&mut self) -> Result<Note, StoreError> {
        self.store.create_note()
    }

    fn navigate_to(&mut self, slug: &str) {
        self.navigated.push(slug.to_string());
    }
}

macro_rules! split {
    ($h:expr) => {
        (
            &$h.notes,
            Effects {
                store: &mut $h.store,
                pinned: &mut $h.pinned,
                navigated: &mut $h.navigated,
            },
        )
    };
}

fn make_note(slug: &str, title: &str) -> Note {
    let mut note = Note::new(format!("note_{}", slug), slug, title);
    note.created_at = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
    note
}

fn collection() -> Vec<Note> {
    vec![
        make_note("apple", "Apple pie"),
        make_note("apricot", "Apricot jam"),
        make_note("avocado", "Avocado toast"),
        make_note("banana", "Banana bread"),
    ]
}

fn search(controller: &mut SidebarController, query: &str, notes: &[Note]) {
    controller.focus_search();
    controller.set_query(query, &NoteSearch, notes);
}

fn results_view<'a>(controller: &'a SidebarController, ctx: &SidebarContext<'a>) -> Vec<String> {
    match controller.view(ctx) {
        SidebarView::Results(rows) => rows.iter().map(|r| r.note.slug.clone()).collect(),
        SidebarView::NoResults => Vec::new(),
        SidebarView::Browse(sections) => sections
            .iter()
            .flat_map(|s| s.rows.iter().map(|r| r.note.slug.clone()))
            .collect(),
    }
}

#[test]
fn highlight_stays_in_bounds_for_any_input_sequence() {
    for len in 1..=6usize {
        let results: Vec<Note> = (0..len)
            .map(|i| make_note(&format!("n{}", i), "x"))
            .collect();
        let mut controller = SidebarController::new();
        controller.apply_results(Some(results));

        let mut seed = len as u64 * 7 + 3;
        for _ in 0..200 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            if (seed >> 33) % 2 == 0 {
                controller.next();
            } else {
                controller.previous();
            }
            assert!(controller.highlighted_index() < len);
        }
    }
}

#[test]
fn new_result_set_resets_highlight() {
    let notes = collection();
    let mut controller = SidebarController::new();
    search(&mut controller, "a", &notes);
    controller.blur_search();
    controller.next();
    controller.next();
    controller.next();
    assert_eq!(controller.highlighted_index(), 3);

    // Shorter result set: reset, not clamp
    controller.focus_search();
    controller.edit_query(QueryEdit::Insert('p'), &NoteSearch, &notes);
    assert_eq!(controller.results().map(<[Note]>::len), Some(2));
    assert_eq!(controller.highlighted_index(), 0);
}

#[test]
fn pin_toggle_twice_restores_membership() {
    let mut harness = Harness::new(collection());
    let mut controller = SidebarController::new();

    for initially_pinned in [false, true] {
        if initially_pinned {
            harness.pinned.insert("banana");
        }
        let (notes, mut effects) = split!(harness);
        controller.toggle_pin("banana", notes, &mut effects).unwrap();
        controller.toggle_pin("banana", notes, &mut effects).unwrap();
        assert_eq!(harness.pinned.contains("banana"), initially_pinned);
    }
}

#[test]
fn opening_second_swipe_row_closes_first() {
    let mut controller = SidebarController::new();
    controller.open_swipe("apple");
    controller.open_swipe("banana");
    assert_eq!(controller.open_swipe_slug(), Some("banana"));

    assert!(!controller.close_swipe("apple"));
    assert_eq!(controller.open_swipe_slug(), Some("banana"));
    assert!(controller.close_swipe("banana"));
    assert_eq!(controller.open_swipe_slug(), None);
}

#[test]
fn every_mutation_from_search_returns_to_browse() {
    let mut harness = Harness::new(collection());
    let mut controller = SidebarController::new();

    search(&mut controller, "ap", &harness.notes);
    {
        let (notes, mut effects) = split!(harness);
        controller.toggle_pin("apple", notes, &mut effects).unwrap();
    }
    assert!(controller.results().is_none());
    assert_eq!(controller.search_field().query(), "");
    assert!(!controller.is_search_focused());

    search(&mut controller, "ap", &harness.notes);
    {
        let (notes, mut effects) = split!(harness);
        assert!(controller.edit("apricot", notes, &mut effects));
    }
    assert!(controller.results().is_none());
    assert_eq!(harness.navigated, vec!["apricot"]);

    search(&mut controller, "ap", &harness.notes);
    {
        let (notes, mut effects) = split!(harness);
        controller.delete("apple", notes, &mut effects).unwrap();
    }
    assert!(controller.results().is_none());
}

#[test]
fn browse_view_skips_absent_categories() {
    let n1 = make_note("n1", "N1");
    let n2 = make_note("n2", "N2");
    let n3 = make_note("n3", "N3");
    let mut grouped = GroupedNotes::new();
    grouped.insert("today", vec![n1]);
    grouped.insert("older", vec![n2, n3]);
    let categories = vec![
        Category::new("pinned", "Pinned"),
        Category::new("today", "Today"),
        Category::new("older", "Older"),
    ];
    let pinned = PinnedSet::new();
    let ctx = SidebarContext {
        grouped: &grouped,
        categories: &categories,
        pinned: &pinned,
        selected: None,
    };

    let controller = SidebarController::new();
    let SidebarView::Browse(sections) = controller.view(&ctx) else {
        panic!("expected browse view");
    };
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].key, "today");
    assert_eq!(sections[0].rows.len(), 1);
    assert_eq!(sections[1].key, "older");
    let older: Vec<&str> = sections[1].rows.iter().map(|r| r.note.slug.as_str()).collect();
    assert_eq!(older, vec!["n2", "n3"]);
}

#[test]
fn empty_search_shows_no_results_indicator() {
    let notes = collection();
    let mut controller = SidebarController::new();
    search(&mut controller, "zucchini", &notes);

    let grouped = GroupedNotes::new();
    let categories = vec![Category::new("today", "Today")];
    let pinned = PinnedSet::new();
    let ctx = SidebarContext {
        grouped: &grouped,
        categories: &categories,
        pinned: &pinned,
        selected: None,
    };
    assert_eq!(controller.view(&ctx), SidebarView::NoResults);
}

#[test]
fn next_twice_from_middle_wraps_to_start() {
    let mut controller = SidebarController::new();
    controller.apply_results(Some(vec![
        make_note("a", "A"),
        make_note("b", "B"),
        make_note("c", "C"),
    ]));
    controller.next();
    assert_eq!(controller.highlighted_index(), 1);

    let mut harness = Harness::new(Vec::new());
    let (_, mut effects) = split!(harness);
    controller.handle_input(SidebarInput::Next, &mut effects);
    controller.handle_input(SidebarInput::Next, &mut effects);
    assert_eq!(controller.highlighted_index(), 0);
}

#[test]
fn deleted_highlighted_result_never_rendered_again() {
    let mut harness = Harness::new(collection());
    let mut controller = SidebarController::new();
    search(&mut controller, "a", &harness.notes);
    controller.blur_search();
    controller.next();
    let target = controller.highlighted_note().unwrap().slug.clone();
    assert_eq!(target, "apricot");

    {
        let (notes, mut effects) = split!(harness);
        assert!(controller.delete(&target, notes, &mut effects).unwrap());
    }
    harness.reload();
    controller.sync_notes(&NoteSearch, &harness.notes);

    // Browse view after the reload
    let grouped = notebar::note::group_notes(&harness.notes, &harness.pinned, Utc::now());
    let categories = notebar::note::grouping::default_category_order();
    let ctx = SidebarContext {
        grouped: &grouped,
        categories: &categories,
        pinned: &harness.pinned,
        selected: None,
    };
    assert!(!results_view(&controller, &ctx).contains(&target));

    // A fresh search cannot surface it either
    search(&mut controller, "a", &harness.notes);
    assert!(!results_view(&controller, &ctx).contains(&target));
}

#[test]
fn failed_delete_surfaces_store_error() {
    let mut harness = Harness::new(collection());
    harness.store.fail_deletes("read-only volume");
    let mut controller = SidebarController::new();
    search(&mut controller, "banana", &harness.notes);

    let err = {
        let (notes, mut effects) = split!(harness);
        controller.delete("banana", notes, &mut effects).unwrap_err()
    };
    assert!(matches!(err, StoreError::Rejected { .. }));
    assert!(err.to_string().contains("read-only volume"));
    assert!(!controller.is_searching());
    assert_eq!(harness.store.delete_calls(), 1);
    assert_eq!(harness.store.notes().len(), 4);
}

#[test]
fn unknown_slug_never_reaches_the_store() {
    let mut harness = Harness::new(collection());
    let mut controller = SidebarController::new();
    let (notes, mut effects) = split!(harness);

    assert!(!controller.delete("ghost", notes, &mut effects).unwrap());
    assert!(!controller.toggle_pin("ghost", notes, &mut effects).unwrap());
    assert_eq!(harness.store.delete_calls(), 0);
    assert!(harness.pinned.is_empty());
}

#[test]
fn confirm_while_typing_opens_and_resets() {
    let mut harness = Harness::new(collection());
    let mut controller = SidebarController::new();
    search(&mut controller, "bread", &harness.notes);
    assert!(controller.is_search_focused());

    let (_, mut effects) = split!(harness);
    let outcome = controller.handle_input(SidebarInput::Confirm, &mut effects);
    assert_eq!(outcome, InputOutcome::Opened("banana".to_string()));
    assert_eq!(harness.navigated, vec!["banana"]);
    assert!(controller.results().is_none());
}

#[test]
fn new_note_is_created_pinned_and_opened() {
    let mut harness = Harness::new(collection());
    let mut controller = SidebarController::new();
    search(&mut controller, "ap", &harness.notes);

    let slug = {
        let (_, mut effects) = split!(harness);
        controller.create_note(&mut effects).unwrap()
    };
    harness.reload();

    assert!(controller.results().is_none());
    assert!(harness.pinned.contains(&slug));
    assert_eq!(harness.navigated.last(), Some(&slug));
    assert!(harness.notes.iter().any(|n| n.slug == slug));
}

#[test]
fn custom_search_provider_controls_ranking() {
    let notes = collection();
    let reversed = |query: &str, notes: &[Note]| -> Option<Vec<Note>> {
        if query.is_empty() {
            return None;
        }
        let mut hits = NoteSearch.search(query, notes)?;
        hits.reverse();
        Some(hits)
    };

    let mut controller = SidebarController::new();
    controller.set_query("ap", &reversed, &notes);
    let slugs: Vec<&str> = controller
        .results()
        .unwrap()
        .iter()
        .map(|n| n.slug.as_str())
        .collect();
    assert_eq!(slugs, vec!["apricot", "apple"]);
}

#[test]
fn reload_drops_swipe_of_externally_removed_note() {
    let mut controller = SidebarController::new();
    let mut notes = collection();
    controller.open_swipe("avocado");

    notes.retain(|n| n.slug != "avocado");
    controller.sync_notes(&NoteSearch, &notes);
    assert_eq!(controller.open_swipe_slug(), None);

    // Browse mode stays browse mode after a reload
    assert!(!controller.is_searching());
}
