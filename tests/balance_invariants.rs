use corpus_tagger::{
    CancelToken, MemoryStore, ObjectStore, SetLabel, TagSet, balance_with_rng, set_counts,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

const CONTAINER: &str = "en-invoices";

fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.create_container(CONTAINER).unwrap();
    store
}

fn add_doc(store: &MemoryStore, key: &str, set: SetLabel) {
    store.put_object(CONTAINER, key, b"x").unwrap();
    store
        .set_tags(
            CONTAINER,
            key,
            &TagSet::from_entries([("DocType", "Invoices"), ("Set", set.as_str())]),
        )
        .unwrap();
}

fn output_types() -> Vec<String> {
    vec!["html".to_string()]
}

#[test]
fn balance_converges_to_the_target_fraction() {
    let store = seeded_store();
    for idx in 0..10 {
        add_doc(&store, &format!("pdf/doc{idx}.pdf"), SetLabel::Train);
    }

    let report = balance_with_rng(
        &store,
        CONTAINER,
        &output_types(),
        0.3,
        &mut StdRng::seed_from_u64(7),
        &CancelToken::new(),
    )
    .unwrap();

    assert_eq!(report.total, 10);
    assert_eq!(report.transferred, 3);
    let counts = set_counts(&store, CONTAINER).unwrap();
    assert_eq!(counts.test, 3);
    assert_eq!(counts.train, 7);
}

#[test]
fn balance_is_a_no_op_when_already_at_target() {
    let store = seeded_store();
    for idx in 0..7 {
        add_doc(&store, &format!("pdf/doc{idx}.pdf"), SetLabel::Train);
    }
    for idx in 0..3 {
        add_doc(&store, &format!("pdf/test{idx}.pdf"), SetLabel::Test);
    }

    let report = balance_with_rng(
        &store,
        CONTAINER,
        &output_types(),
        0.3,
        &mut StdRng::seed_from_u64(7),
        &CancelToken::new(),
    )
    .unwrap();
    assert_eq!(report.transferred, 0);
}

#[test]
fn balancer_terminates_on_small_corpora_with_output_types() {
    let store = seeded_store();
    add_doc(&store, "pdf/a.pdf", SetLabel::Train);
    add_doc(&store, "pdf/b.pdf", SetLabel::Train);
    add_doc(&store, "pdf/c.pdf", SetLabel::Train);
    add_doc(&store, "html/a.html", SetLabel::Train);
    add_doc(&store, "html/b.html", SetLabel::Train);

    let report = balance_with_rng(
        &store,
        CONTAINER,
        &output_types(),
        0.3,
        &mut StdRng::seed_from_u64(11),
        &CancelToken::new(),
    )
    .unwrap();

    // n=5 → target 1; the transferred document must be an input, and an
    // output changes only when its paired input was transferred.
    assert_eq!(report.transferred, 1);
    for key in ["html/a.html", "html/b.html"] {
        let output_label = store.get_tags(CONTAINER, key).unwrap().set_label();
        let input_key = format!("pdf/{}.pdf", &key[5..6]);
        let input_label = store.get_tags(CONTAINER, &input_key).unwrap().set_label();
        assert_eq!(output_label, input_label);
    }
    let test_inputs = ["pdf/a.pdf", "pdf/b.pdf", "pdf/c.pdf"]
        .iter()
        .filter(|key| {
            store.get_tags(CONTAINER, key).unwrap().set_label() == Some(SetLabel::Test)
        })
        .count();
    assert_eq!(test_inputs, 1);
}

#[test]
fn exhausted_eligible_pool_yields_a_smaller_transfer_count() {
    let store = seeded_store();
    add_doc(&store, "pdf/a.pdf", SetLabel::Train);
    add_doc(&store, "pdf/b.pdf", SetLabel::Train);
    for idx in 0..8 {
        add_doc(&store, &format!("html/out{idx}.html"), SetLabel::Train);
    }

    // n=10, target 5, but only two eligible inputs exist.
    let report = balance_with_rng(
        &store,
        CONTAINER,
        &output_types(),
        0.5,
        &mut StdRng::seed_from_u64(3),
        &CancelToken::new(),
    )
    .unwrap();

    assert_eq!(report.transferred, 2);
    // Orphan output artifacts were never reassigned directly.
    for idx in 0..8 {
        let tags = store
            .get_tags(CONTAINER, &format!("html/out{idx}.html"))
            .unwrap();
        assert_eq!(tags.set_label(), Some(SetLabel::Train));
    }
}

#[test]
fn transferred_inputs_mirror_their_tags_onto_paired_outputs() {
    let store = seeded_store();
    add_doc(&store, "pdf/report.pdf", SetLabel::Train);
    add_doc(&store, "html/report.html", SetLabel::Train);

    // n=2 → target floor(1.2)=1; the only eligible document is the input.
    let report = balance_with_rng(
        &store,
        CONTAINER,
        &output_types(),
        0.6,
        &mut StdRng::seed_from_u64(5),
        &CancelToken::new(),
    )
    .unwrap();

    assert_eq!(report.transferred, 1);
    let input_tags = store.get_tags(CONTAINER, "pdf/report.pdf").unwrap();
    let output_tags = store.get_tags(CONTAINER, "html/report.html").unwrap();
    assert_eq!(input_tags.set_label(), Some(SetLabel::Test));
    assert_eq!(output_tags, input_tags);
    assert_eq!(output_tags.get("DocType"), Some("Invoices"));
}

#[test]
fn seeded_runs_select_the_same_documents() {
    let build = || {
        let store = seeded_store();
        for idx in 0..12 {
            add_doc(&store, &format!("pdf/doc{idx}.pdf"), SetLabel::Train);
        }
        store
    };

    let test_keys = |store: &MemoryStore| -> Vec<String> {
        store
            .list_objects(CONTAINER)
            .unwrap()
            .map(|info| info.unwrap())
            .filter(|info| {
                store.get_tags(CONTAINER, &info.key).unwrap().set_label()
                    == Some(SetLabel::Test)
            })
            .map(|info| info.key)
            .collect()
    };

    let first = build();
    let second = build();
    for store in [&first, &second] {
        balance_with_rng(
            store,
            CONTAINER,
            &output_types(),
            0.3,
            &mut StdRng::seed_from_u64(42),
            &CancelToken::new(),
        )
        .unwrap();
    }
    assert_eq!(test_keys(&first), test_keys(&second));
}

#[test]
fn cancelled_balancing_transfers_nothing() {
    let store = seeded_store();
    for idx in 0..10 {
        add_doc(&store, &format!("pdf/doc{idx}.pdf"), SetLabel::Train);
    }

    let cancel = CancelToken::new();
    cancel.cancel();
    let report = balance_with_rng(
        &store,
        CONTAINER,
        &output_types(),
        0.3,
        &mut StdRng::seed_from_u64(1),
        &cancel,
    )
    .unwrap();

    assert_eq!(report.transferred, 0);
    assert_eq!(set_counts(&store, CONTAINER).unwrap().test, 0);
}
