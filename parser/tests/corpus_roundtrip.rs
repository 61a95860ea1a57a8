use docsearch_core::{IndexStore, Searcher, WordTokenizer};
use parser::{run, ParseOptions, ParseStats};
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

#[test]
fn parsed_corpus_is_searchable() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input");
    fs::create_dir_all(input.join("asio")).unwrap();
    fs::write(
        input.join("asio/index.html"),
        "<html><head><title>Boost.Asio</title></head><body><p>Asio is a\ncross-platform library</p></body></html>",
    )
    .unwrap();
    fs::write(input.join("notitle.html"), "<html><body>orphan</body></html>").unwrap();
    fs::write(input.join("readme.txt"), "ignored").unwrap();

    let output = dir.path().join("out/raw.txt");
    let stats = run(&ParseOptions {
        input: input.clone(),
        output: output.clone(),
        url_prefix: "https://www.boost.org/doc".into(),
    })
    .unwrap();
    assert_eq!(stats, ParseStats { written: 1, skipped: 1 });

    let corpus = fs::read_to_string(&output).unwrap();
    assert_eq!(corpus.lines().count(), 1);
    assert!(!corpus.trim_end().contains('\n'));

    let store = IndexStore::build_from_path(&output, &WordTokenizer).unwrap();
    assert_eq!(store.len(), 1);
    let hits = Searcher::with_word_tokenizer(Arc::new(store)).search("library").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Boost.Asio");
    assert_eq!(hits[0].url, "https://www.boost.org/doc/asio/index.html");
    assert_eq!(hits[0].snippet, "Boost.AsioAsio is a cross-platform library");

    // Title words also occur in the stripped body text: 10 (title) + 1 (body).
    let store = IndexStore::build_from_path(&output, &WordTokenizer).unwrap();
    assert_eq!(store.get_postings("boost").unwrap()[0].weight, 11);
}

#[test]
fn missing_input_directory_fails() {
    let dir = tempdir().unwrap();
    let err = run(&ParseOptions {
        input: dir.path().join("absent"),
        output: dir.path().join("raw.txt"),
        url_prefix: "https://x".into(),
    });
    assert!(err.is_err());
}
