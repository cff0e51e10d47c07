// Unit tests for the LDA topic model's contract-level properties:
// topic coverage, deterministic training, tie-breaking, and the
// empty-corpus edge cases.

use hirszemle::topics::lda::{LdaBuilder, LdaModel, LdaParams};
use hirszemle::topics::traits::{TopicModel, TopicModelBuilder};

fn params(num_topics: usize) -> LdaParams {
    LdaParams {
        num_topics,
        iterations: 30,
        passes: 1,
        seed: 42,
    }
}

fn docs(texts: &[&str]) -> Vec<Vec<String>> {
    texts
        .iter()
        .map(|t| t.split_whitespace().map(|w| w.to_string()).collect())
        .collect()
}

// ============================================================
// Topic coverage — num_topics topics regardless of corpus size
// ============================================================

#[test]
fn every_topic_id_is_addressable_for_any_corpus_size() {
    let corpora = [
        docs(&[]),
        docs(&["kormány döntés"]),
        docs(&[
            "kormány döntés törvény",
            "futball gól meccs",
            "időjárás eső vihar",
            "gazdaság forint árfolyam",
            "egészségügy kórház orvos",
        ]),
    ];

    for corpus in &corpora {
        for k in 1..=4 {
            let model = LdaModel::fit(corpus, &params(k)).unwrap();
            assert_eq!(model.num_topics(), k);
            for topic_id in 0..k {
                // top_words never panics, and is empty only when the
                // vocabulary is empty
                let words = model.top_words(topic_id, 5);
                if model.vocab_size() == 0 {
                    assert!(words.is_empty());
                } else {
                    assert!(!words.is_empty());
                }
            }
        }
    }
}

#[test]
fn dominant_topic_is_always_in_range() {
    let corpus = docs(&["kormány döntés", "futball gól", "eső vihar"]);
    let model = LdaModel::fit(&corpus, &params(3)).unwrap();

    let probes = [
        vec!["kormány".to_string()],
        vec!["ismeretlen".to_string(), "szavak".to_string()],
        vec![],
    ];
    for probe in &probes {
        assert!(model.dominant_topic(probe) < 3);
    }
}

// ============================================================
// Determinism and tie-breaking
// ============================================================

#[test]
fn fixed_seed_reproduces_assignments() {
    let corpus = docs(&[
        "kormány döntés törvény parlament",
        "futball gól meccs bajnokság",
        "kormány törvény szavazás",
        "futball bajnokság gól",
    ]);

    let a = LdaModel::fit(&corpus, &params(2)).unwrap();
    let b = LdaModel::fit(&corpus, &params(2)).unwrap();

    for doc in &corpus {
        assert_eq!(a.dominant_topic(doc), b.dominant_topic(doc));
        for t in 0..2 {
            assert_eq!(a.top_words(t, 5), b.top_words(t, 5));
        }
    }
}

#[test]
fn empty_corpus_ties_resolve_to_topic_zero() {
    // With no training data every topic scores identically, so the
    // lowest-id tie-break must pick topic 0 for any input.
    let model = LdaModel::fit(&[], &params(4)).unwrap();
    assert_eq!(model.dominant_topic(&[]), 0);
    assert_eq!(model.dominant_topic(&["bármi".to_string()]), 0);
}

#[test]
fn out_of_vocabulary_probe_is_deterministic() {
    let corpus = docs(&["kormány döntés", "futball gól"]);
    let model = LdaModel::fit(&corpus, &params(2)).unwrap();

    let probe = vec!["teljesen".to_string(), "ismeretlen".to_string()];
    let first = model.dominant_topic(&probe);
    let second = model.dominant_topic(&probe);
    assert_eq!(first, second);
}

// ============================================================
// Builder trait
// ============================================================

#[test]
fn builder_produces_equivalent_model() {
    let corpus = docs(&["kormány döntés", "futball gól"]);
    let builder = LdaBuilder { params: params(2) };

    let boxed = builder.fit(&corpus).unwrap();
    let direct = LdaModel::fit(&corpus, &params(2)).unwrap();

    assert_eq!(boxed.num_topics(), direct.num_topics());
    assert_eq!(boxed.vocab_size(), direct.vocab_size());
    for t in 0..2 {
        assert_eq!(boxed.top_words(t, 5), direct.top_words(t, 5));
    }
}
