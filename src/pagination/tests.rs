//! Tests for pagination module

use super::*;
use crate::error::Error;
use pretty_assertions::assert_eq;

// ============================================================================
// Cursor Tests
// ============================================================================

#[test]
fn test_cursor_parse_and_display() {
    let cursor: Cursor = "20".parse().unwrap();
    assert_eq!(cursor.offset(), 20);
    assert_eq!(cursor.to_string(), "20");
}

#[test]
fn test_cursor_rejects_garbage() {
    let err = "next-page".parse::<Cursor>().unwrap_err();
    assert!(matches!(err, Error::InvalidCursor { .. }));

    assert!("-1".parse::<Cursor>().is_err());
}

#[test]
fn test_cursor_serde_as_string() {
    let json = serde_json::to_string(&Cursor::from_offset(40)).unwrap();
    assert_eq!(json, "\"40\"");

    let back: Cursor = serde_json::from_str("\"40\"").unwrap();
    assert_eq!(back.offset(), 40);
}

// ============================================================================
// Page / State Tests
// ============================================================================

#[test]
fn test_page_end() {
    let page: Page<u32> = Page::end();
    assert!(page.is_empty());
    assert!(page.is_last());
    assert_eq!(page.len(), 0);
}

#[test]
fn test_pagination_state_default() {
    let state = PaginationState::new();
    assert_eq!(state.offset, 0);
    assert_eq!(state.pages, 0);
    assert_eq!(state.total_fetched, 0);
    assert!(!state.done);
    assert_eq!(state.next_cursor(), Some(Cursor::from_offset(0)));
}

#[test]
fn test_pagination_state_done_has_no_cursor() {
    let mut state = PaginationState::new();
    state.add_offset(20);
    state.mark_done();
    assert_eq!(state.next_cursor(), None);
}

// ============================================================================
// OffsetPaginator Tests
// ============================================================================

#[test]
fn test_offset_params() {
    let paginator = OffsetPaginator::new(20);

    assert_eq!(
        paginator.params(None),
        vec![
            ("offset".to_string(), "0".to_string()),
            ("limit".to_string(), "20".to_string()),
        ]
    );
    assert_eq!(
        paginator.params(Some(Cursor::from_offset(40)))[0],
        ("offset".to_string(), "40".to_string())
    );
}

#[test]
fn test_offset_with_next_link() {
    let paginator = OffsetPaginator::new(20);
    let mut state = PaginationState::new();

    let page = paginator.process(RawPage::with_next((0..20).collect::<Vec<_>>(), true), &mut state);
    assert_eq!(page.len(), 20);
    assert_eq!(page.next_cursor, Some(Cursor::from_offset(20)));

    let page = paginator.process(RawPage::with_next((20..27).collect::<Vec<_>>(), false), &mut state);
    assert_eq!(page.len(), 7);
    assert_eq!(page.next_cursor, None);
    assert!(state.done);
    assert_eq!(state.total_fetched, 27);
    assert_eq!(state.pages, 2);
}

#[test]
fn test_offset_next_link_wins_over_page_size() {
    let paginator = OffsetPaginator::new(20);
    let mut state = PaginationState::new();

    // Full page but the source says it is the last one
    let page = paginator.process(RawPage::with_next(vec![1; 20], false), &mut state);
    assert!(page.is_last());

    // Short page but the source says there is more
    let mut state = PaginationState::new();
    let page = paginator.process(RawPage::with_next(vec![1; 5], true), &mut state);
    assert_eq!(page.next_cursor, Some(Cursor::from_offset(5)));
}

#[test]
fn test_offset_empty_page_is_done_even_with_next() {
    let paginator = OffsetPaginator::new(20);
    let mut state = PaginationState::new();

    let page = paginator.process(RawPage::<u32>::with_next(vec![], true), &mut state);
    assert!(page.is_last());
    assert!(state.done);
}

#[test]
fn test_offset_fully_filtered_page_keeps_going() {
    let paginator = OffsetPaginator::new(20);
    let mut state = PaginationState::new();

    let page = paginator.process(RawPage::<u32>::with_next(vec![], true).consumed(20), &mut state);
    assert!(page.is_empty());
    assert_eq!(page.next_cursor, Some(Cursor::from_offset(20)));
    assert!(!state.done);
    assert_eq!(state.total_fetched, 0);
}

#[test]
fn test_offset_limit_is_clamped() {
    assert_eq!(OffsetPaginator::new(0).limit_value, 1);
    assert_eq!(OffsetPaginator::new(500).limit_value, 50);
    assert_eq!(OffsetPaginator::new(35).limit_value, 35);
}

#[test]
fn test_offset_bare_uses_page_size() {
    let paginator = OffsetPaginator::new(10);
    let mut state = PaginationState::new();

    let page = paginator.process(RawPage::bare(vec![0u8; 10]), &mut state);
    assert_eq!(page.next_cursor, Some(Cursor::from_offset(10)));

    let page = paginator.process(RawPage::bare(vec![0u8; 3]), &mut state);
    assert!(page.is_last());
    assert_eq!(state.total_fetched, 13);
}

// ============================================================================
// ScrollPosition Tests
// ============================================================================

#[test]
fn test_scroll_near_bottom() {
    let pos = ScrollPosition::new(700, 800, 1600);
    assert_eq!(pos.remaining(), 100);
    assert!(pos.is_near_bottom(200));
    assert!(!pos.is_near_bottom(50));
}

#[test]
fn test_scroll_short_content_is_near_bottom() {
    // List shorter than the viewport
    let pos = ScrollPosition::new(0, 800, 300);
    assert_eq!(pos.remaining(), 0);
    assert!(pos.is_near_bottom(0));
}
