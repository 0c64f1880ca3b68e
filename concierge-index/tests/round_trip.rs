use concierge_index::IndexBuilder;
use proptest::prelude::*;

proptest! {
    #[test]
    fn tokenize_is_identical_on_save_and_load_paths(
        docs in prop::collection::vec("[a-z]{1,8}( [a-z]{1,8}){0,4}", 1..6),
        query in "[a-z]{1,8}",
    ) {
        let mut builder = IndexBuilder::with_default_stopwords(1.5, 0.75);
        for (i, text) in docs.iter().enumerate() {
            builder.add_document(format!("doc-{i}"), text);
        }
        let index = builder.build();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.bin");
        index.persist(&path).unwrap();
        let loaded = concierge_index::InvertedIndex::load(&path).unwrap();

        prop_assert_eq!(index.search(&query, 50), loaded.search(&query, 50));
    }
}
