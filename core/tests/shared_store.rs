use docsearch_core::IndexStore;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

// Kept alone in its own test binary: the shared store is process-wide.
#[test]
fn shared_store_is_built_exactly_once() {
    let mut f = NamedTempFile::new().unwrap();
    writeln!(f, "t\x03only document\x03u").unwrap();
    let path = f.path().to_path_buf();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let p = path.clone();
            std::thread::spawn(move || IndexStore::shared(p).unwrap())
        })
        .collect();
    let stores: Vec<Arc<IndexStore>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for s in &stores {
        assert!(Arc::ptr_eq(s, &stores[0]));
    }

    // The path of later calls is ignored once the store exists.
    let again = IndexStore::shared("/no/such/corpus").unwrap();
    assert!(Arc::ptr_eq(&again, &stores[0]));
    assert_eq!(again.len(), 1);
}
