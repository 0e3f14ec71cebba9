//! End-to-end scenarios over the public core API: parse a catalog, filter,
//! page through it, resolve a watch link and classify the source.

use cinema_core::entry::{identifier_from_link, parse_catalog_str, share_link};
use cinema_core::{classify_playability, CatalogViewModel, MediaHint, Playability};

fn sample_catalog() -> CatalogViewModel {
    let json = r#"[
        {"id": 7, "title": "Dark Knight", "year": 2008, "genre": "Action", "url": "https://cdn.test/dk.MP4?sig=abc"},
        {"title": "Up", "year": "2009", "genre": "Family", "url": "https://cdn.test/up/master.m3u8"},
        {"year": "1999", "genre": "Action", "url": "https://example.com/watch?id=1"},
        {"id": "the dark", "title": "The Dark", "genre": "Horror", "url": ""},
        {"title": "Arrival", "genre": "Drama"}
    ]"#;
    CatalogViewModel::with_entries(parse_catalog_str(json).unwrap())
}

#[test]
fn dark_query_matches_titles_and_skips_untitled() {
    let mut vm = sample_catalog();
    vm.set_filters("dark", "");
    let idx: Vec<_> = vm.filtered_entries().map(|e| e.index).collect();
    assert_eq!(idx, vec![0, 3]);

    vm.set_filters("dark", "Action");
    let idx: Vec<_> = vm.filtered_entries().map(|e| e.index).collect();
    assert_eq!(idx, vec![0]);
}

#[test]
fn filter_soundness_and_completeness() {
    let mut vm = sample_catalog();
    for (query, genre) in [("", ""), ("a", ""), ("", "Action"), ("UP", "Family"), ("zzz", "")] {
        vm.set_filters(query, genre);
        let kept: Vec<usize> = vm.filtered_entries().map(|e| e.index).collect();
        let q = query.trim().to_lowercase();
        for (i, entry) in vm.entries().iter().enumerate() {
            let expected = cinema_core::catalog::entry_matches(entry, &q, genre);
            assert_eq!(kept.contains(&i), expected, "entry {i} for ({query:?}, {genre:?})");
        }
    }
}

#[test]
fn share_link_resolves_back_regardless_of_filter() {
    let mut vm = sample_catalog();
    let page = vm.get_page(12);
    let links: Vec<String> = page
        .items
        .iter()
        .map(|item| share_link("watch.html", &item.identifier()))
        .collect();
    assert_eq!(links[0], "watch.html?id=7");
    assert_eq!(links[1], "watch.html?id=1");
    assert_eq!(links[3], "watch.html?id=the%20dark");

    vm.set_filters("arrival", "");
    for (position, link) in links.iter().enumerate() {
        let id = identifier_from_link(link).unwrap();
        let found = vm.resolve_entry(&id).unwrap();
        assert_eq!(found.index, position);
    }
}

#[test]
fn watch_flow_classifies_sources() {
    let vm = sample_catalog();
    let kinds: Vec<Playability> = vm
        .entries()
        .iter()
        .map(|e| classify_playability(e.url.as_deref()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            Playability::DirectMedia(MediaHint::Mp4),
            Playability::DirectMedia(MediaHint::HlsPlaylist),
            Playability::ExternalLink,
            Playability::ExternalLink,
            Playability::ExternalLink,
        ]
    );
}

#[test]
fn recommendations_for_watched_entry() {
    let vm = sample_catalog();
    let current = vm.resolve_entry("7").unwrap();
    let recs: Vec<usize> = vm
        .recommendations(current.index, 20)
        .iter()
        .map(|e| e.index)
        .collect();
    assert_eq!(recs, vec![1, 2, 3, 4]);
}

#[test]
fn unknown_identifier_is_not_found() {
    let vm = sample_catalog();
    assert!(vm.resolve_entry("99").is_none());
    assert!(vm.resolve_entry("missing").is_none());
}
