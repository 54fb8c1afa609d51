//! Collation search through the string API; ranges are codepoint ranges.

mod common;

use common::u;
use unitext::{SearchOptions, SearchSession, Space, TextBuffer, UString};

const FOXES: &str = "A quick brown fox jumped over the lazy fox dancing foxtrote";

#[test]
fn exact_and_case_insensitive() {
    let a = u(FOXES);
    let en = || SearchOptions::new().locale("en");
    assert_eq!(a.search("fox", &en()), vec![14..17, 39..42, 51..54]);
    assert!(a.search("FoX", &en()).is_empty());
    assert_eq!(
        a.search("FoX", &en().ignore_case()),
        vec![14..17, 39..42, 51..54]
    );
    assert_eq!(
        a.search("FoX", &en().ignore_case().whole_words()),
        vec![14..17, 39..42]
    );
    assert_eq!(
        a.search("FoX", &en().ignore_case().whole_words().limit(1)),
        vec![14..17]
    );
}

#[test]
fn accent_and_expansion_strength() {
    let b = u("Iñtërnâtiônàlizætiøn îs cọmpłèx").upcase();
    assert_eq!(b, "IÑTËRNÂTIÔNÀLIZÆTIØN ÎS CỌMPŁÈX");
    let en = || SearchOptions::new().locale("en");
    assert!(b.search("nâtiôn", &en()).is_empty());
    assert!(b.search("nation", &SearchOptions::new()).is_empty());
    assert_eq!(b.search("nation", &en().ignore_case_accents()), vec![5..11]);
    assert_eq!(b.search("nâtiôn", &en().ignore_case()), vec![5..11]);
    assert!(b.search("zaeti", &en()).is_empty());
    assert!(b.search("zaeti", &en().ignore_case()).is_empty());
    assert_eq!(b.search("zaeti", &en().ignore_case_accents()), vec![14..18]);
}

#[test]
fn turkish_dotted_capital() {
    let opts = SearchOptions::new().locale("tr").ignore_case();
    assert_eq!(u("İSTANBUL").search("istanbul", &opts), vec![0..8]);
}

#[test]
fn canonical_equivalence_in_decomposed_text() {
    let text = u("ёжий").normalize(unitext::NormalForm::Nfd);
    let opts = SearchOptions::new()
        .locale("ru")
        .canonical()
        .ignore_case_accents();
    assert_eq!(text.search("ЕЖИЙ", &opts), vec![0..6]);

    let buf = TextBuffer::with_text(&text.to_string());
    let session = SearchSession::new(&buf, opts);
    assert_eq!(session.find_all("ЕЖИЙ"), vec![0..4]);
    assert_eq!(session.find_all_in("ЕЖИЙ", Space::CodeUnit), vec![0..6]);
}

#[test]
fn search_does_not_change_text() {
    let a = UString::from(FOXES);
    let _ = a.search("fox", &SearchOptions::new());
    assert_eq!(a.version(), 0);
    a.push_str("!").unwrap();
    assert_eq!(a.len(), FOXES.chars().count() + 1);
}
