//! End-to-end resolution scenarios.
//!
//! Each test walks a small document (or a single chain) through the public
//! API and checks the chain identifiers and scores that come out.

use coref_chains::{
    EntityType, Gender, GenderKiller, Killer, Matcher, Mention, MentionFactory,
    SequenceSubstringMatch, SynonymMatch, WithinDocCoref, NO_MATCH,
};

// =============================================================================
// Resolution order
// =============================================================================

#[test]
fn test_scenario_names_pronoun_and_organization() {
    let mut coref = WithinDocCoref::english();
    let input = [
        ("Mr. John Smith", EntityType::Person, 1),
        ("John Smith", EntityType::Person, 2),
        ("Johanna Smith", EntityType::Person, 3),
        ("he", EntityType::MalePronoun, 3),
        ("IBM", EntityType::Organization, 3),
    ];

    let ids: Vec<usize> = input
        .into_iter()
        .map(|(phrase, ty, sentence)| coref.resolve(phrase, ty, sentence))
        .collect();

    assert_eq!(ids, [0, 0, 1, 1, 2]);

    let johanna = coref.chain(1).unwrap();
    assert_eq!(johanna.gender(), Some(Gender::Male));
    assert_eq!(johanna.len(), 2);
    assert!(coref.chain(0).unwrap().honorifics().contains("mr"));
}

#[test]
fn test_longer_document() {
    let mut coref = WithinDocCoref::english();
    let input = [
        ("Dr. Susan Calvin", EntityType::Person, 0),
        ("U.S. Robots and Mechanical Men", EntityType::Organization, 0),
        ("she", EntityType::FemalePronoun, 1),
        ("Lawrence Robertson", EntityType::Person, 2),
        ("he", EntityType::MalePronoun, 2),
        ("Susan Calvin", EntityType::Person, 3),
        ("Robots and Mechanical Men", EntityType::Organization, 3),
        ("her", EntityType::FemalePronoun, 4),
        ("Mr. Robertson", EntityType::Person, 4),
    ];

    let ids: Vec<usize> = input
        .into_iter()
        .map(|(phrase, ty, sentence)| coref.resolve(phrase, ty, sentence))
        .collect();

    // "Mr. Robertson" shares only one token with "Lawrence Robertson", below
    // the default run of three, so it founds its own chain.
    assert_eq!(ids, [0, 1, 0, 2, 2, 0, 1, 0, 3]);
    assert_eq!(coref.len(), 4);

    let summaries = coref.summaries();
    assert_eq!(summaries[0].canonical, "Dr. Susan Calvin");
    assert_eq!(summaries[0].gender, Some(Gender::Female));
    assert_eq!(summaries[2].gender, Some(Gender::Male));
    assert_eq!(summaries[0].max_sentence_offset, 4);
}

#[test]
fn test_same_phrase_different_mentions() {
    let factory = MentionFactory::english();
    let mut coref = WithinDocCoref::new(&factory);
    let a = factory.create("Acme", EntityType::Organization);
    let b = factory.create("Acme", EntityType::Organization);
    assert_ne!(a, b);

    assert_eq!(coref.resolve_mention(a, 0), 0);
    assert_eq!(coref.resolve_mention(b, 0), 0);
    assert_eq!(coref.chain(0).unwrap().len(), 2);
}

// =============================================================================
// Synonyms
// =============================================================================

#[test]
fn test_scenario_synonym_lifecycle() {
    let mut factory = MentionFactory::english();
    let chain = factory.promote(factory.create("Mr. John Smith", EntityType::Person), 0);
    assert_eq!(chain.mentions()[0].normal_tokens(), ["john", "smith"]);

    let candidate = Mention::builder("John Smith", EntityType::Person)
        .tokens(["johan", "smith"])
        .build()
        .unwrap();
    let synonyms: &SynonymMatch = factory.synonyms();
    let weight = synonyms.weight();

    assert_eq!(synonyms.score(&candidate, &chain), NO_MATCH);

    synonyms.add_synonym("john smith", "johan smith");
    assert_eq!(synonyms.score(&candidate, &chain), weight);
    assert_eq!(chain.match_score(&candidate), weight);

    synonyms.remove_synonym("john smith", "johan smith");
    assert_eq!(synonyms.score(&candidate, &chain), NO_MATCH);

    synonyms.add_synonym("johan smith", "john smith");
    assert_eq!(synonyms.score(&candidate, &chain), weight);
    synonyms.clear_synonyms();
    assert_eq!(synonyms.score(&candidate, &chain), NO_MATCH);
    assert_eq!(chain.match_score(&candidate), NO_MATCH);
}

#[test]
fn test_synonym_registered_mid_document() {
    let mut coref = WithinDocCoref::english();
    assert_eq!(coref.resolve("IBM", EntityType::Organization, 0), 0);
    assert_eq!(coref.resolve("Big Blue", EntityType::Organization, 1), 1);

    coref.synonyms().add_synonym("ibm", "international business machines");
    assert_eq!(
        coref.resolve("International Business Machines", EntityType::Organization, 2),
        0
    );
}

// =============================================================================
// Substring runs
// =============================================================================

fn tokens(tokens: &[&str]) -> Mention {
    Mention::builder(tokens.join(" "), EntityType::Other("THING".to_string()))
        .tokens(tokens.iter().copied())
        .build()
        .unwrap()
}

#[test]
fn test_scenario_substring_runs() {
    let mut factory = MentionFactory::english();
    let matcher = SequenceSubstringMatch::new(3, 7).unwrap();
    let mut chain = factory.promote(tokens(&["a", "b", "c", "d", "e"]), 0);

    assert_eq!(matcher.score(&tokens(&["a", "b", "c", "d"]), &chain), 7);
    assert_eq!(matcher.score(&tokens(&["c", "d", "e"]), &chain), 7);
    assert_eq!(matcher.score(&tokens(&["c", "d"]), &chain), NO_MATCH);
    assert_eq!(matcher.score(&tokens(&["d"]), &chain), NO_MATCH);

    chain.add(tokens(&["d"]), 1);
    assert_eq!(matcher.score(&tokens(&["d"]), &chain), 7);
}

// =============================================================================
// Vetoes
// =============================================================================

fn gendered(gender: Option<Gender>) -> Mention {
    Mention::builder("someone", EntityType::Person)
        .tokens(["someone"])
        .gender(gender)
        .build()
        .unwrap()
}

#[test]
fn test_scenario_gender_killer() {
    let mut factory = MentionFactory::english();
    let chain = factory.promote(factory.create("he", EntityType::MalePronoun), 0);
    assert_eq!(chain.gender(), Some(Gender::Male));

    assert!(GenderKiller.kill(&gendered(Some(Gender::Female)), &chain));
    assert!(!GenderKiller.kill(&gendered(None), &chain));
    assert!(!GenderKiller.kill(&gendered(Some(Gender::Male)), &chain));
}

#[test]
fn test_veto_overrides_exact_match() {
    let mut factory = MentionFactory::english();
    let chain = factory.promote(factory.create("Mr. Jordan", EntityType::Person), 0);
    let conflicting = factory.create("Ms. Jordan", EntityType::Person);

    assert!(chain.killed(&conflicting));
    assert_eq!(chain.match_score(&conflicting), NO_MATCH);
}
