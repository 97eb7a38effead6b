use placematch_match::{MatchConfig, MatchStage, Matcher, RegistryIndex, normalize};
use placematch_model::{MatchStatus, ReferenceRecord};
use serde_json::json;

fn config() -> MatchConfig {
    MatchConfig::default().with_preferred_region("Southeast")
}

fn resolve(index: &RegistryIndex, name: &str) -> (MatchStatus, Option<String>) {
    let matcher = Matcher::new(index, config()).unwrap();
    let result = matcher.resolve(name).unwrap();
    (result.status, result.record.map(|r| r.id_string()))
}

#[test]
fn duplicate_names_prefer_configured_region() {
    let south = ReferenceRecord::new(10, "Santo Andre").with_location("RS", "South");
    let southeast = ReferenceRecord::new(20, "Santo André").with_location("SP", "Southeast");

    let forward = RegistryIndex::new(vec![south.clone(), southeast.clone()]);
    let backward = RegistryIndex::new(vec![southeast, south]);

    for index in [&forward, &backward] {
        let (status, id) = resolve(index, "Santo André");
        assert_eq!(status, MatchStatus::Found);
        assert_eq!(id.as_deref(), Some("20"));
    }
}

#[test]
fn duplicate_names_without_preferred_region_take_first() {
    let index = RegistryIndex::new(vec![
        ReferenceRecord::new(1, "Bom Jesus").with_location("PI", "Northeast"),
        ReferenceRecord::new(2, "Bom Jesus").with_location("RS", "South"),
        ReferenceRecord::new(3, "Bom Jesus"),
    ]);
    let (status, id) = resolve(&index, "BOM JESUS");
    assert_eq!(status, MatchStatus::Found);
    assert_eq!(id.as_deref(), Some("1"));
}

#[test]
fn approximate_match_within_tolerance() {
    let index = RegistryIndex::new(vec![ReferenceRecord::new(4106902, "Curitiba")]);
    let (status, id) = resolve(&index, "Curitba");
    assert_eq!(status, MatchStatus::Found);
    assert_eq!(id.as_deref(), Some("4106902"));
}

#[test]
fn approximate_match_below_tolerance() {
    let index = RegistryIndex::new(vec![ReferenceRecord::new(1, "Curitiba")]);
    assert_eq!(resolve(&index, "Cuiabá").0, MatchStatus::NotFound);
    assert_eq!(resolve(&index, "Porto Alegre").0, MatchStatus::NotFound);
}

#[test]
fn approximate_match_on_shared_name_is_not_found() {
    let index = RegistryIndex::new(vec![
        ReferenceRecord::new(1, "Santa Luzia").with_location("MG", "Southeast"),
        ReferenceRecord::new(2, "Santa Luzia").with_location("PB", "Northeast"),
        ReferenceRecord::new(3, "Curitiba").with_location("PR", "South"),
    ]);
    let matcher = Matcher::new(&index, config()).unwrap();
    let trace = matcher.explain("Santa Luzya").unwrap();
    assert_eq!(trace.stage, MatchStage::AmbiguousApproximate);
    assert_eq!(trace.group_size, 2);
    assert_eq!(trace.result.status, MatchStatus::NotFound);
    assert!(trace.result.record.is_none());
}

#[test]
fn nothing_close_is_not_found() {
    let index = RegistryIndex::new(vec![
        ReferenceRecord::new(1, "Curitiba"),
        ReferenceRecord::new(2, "Manaus"),
    ]);
    let matcher = Matcher::new(&index, config()).unwrap();
    let trace = matcher.explain("Xique-Xique").unwrap();
    assert_eq!(trace.stage, MatchStage::NoCandidate);
    assert!(trace.candidates.is_empty());
    assert_eq!(trace.result.status, MatchStatus::NotFound);
}

#[test]
fn cutoff_is_configurable() {
    let index = RegistryIndex::new(vec![ReferenceRecord::new(1, "Curitiba")]);
    let strict = Matcher::new(&index, config().with_similarity_cutoff(0.95)).unwrap();
    assert_eq!(strict.resolve("Curitba").unwrap().status, MatchStatus::NotFound);
    // exact hits ignore the cutoff
    assert_eq!(strict.resolve("curitiba").unwrap().status, MatchStatus::Found);

    let loose = Matcher::new(&index, config().with_similarity_cutoff(0.5)).unwrap();
    assert_eq!(loose.resolve("Curi").unwrap().status, MatchStatus::Found);
}

#[test]
fn candidate_limit_is_configurable() {
    let index = RegistryIndex::new(vec![
        ReferenceRecord::new(1, "Curitiba"),
        ReferenceRecord::new(2, "Curitibanos"),
    ]);
    let matcher = Matcher::new(&index, config().with_max_candidates(1)).unwrap();
    let trace = matcher.explain("Curitba").unwrap();
    assert_eq!(trace.candidates.len(), 1);
    assert_eq!(trace.result.record.unwrap().id_string(), "1");
}

#[test]
fn equal_scores_resolve_to_first_seen_key() {
    let index = RegistryIndex::new(vec![
        ReferenceRecord::new(1, "Abcx"),
        ReferenceRecord::new(2, "Abcy"),
    ]);
    let matcher = Matcher::new(&index, config().with_similarity_cutoff(0.5)).unwrap();
    assert_eq!(matcher.resolve("abc").unwrap().record.unwrap().id_string(), "1");

    let reversed = RegistryIndex::new(vec![
        ReferenceRecord::new(2, "Abcy"),
        ReferenceRecord::new(1, "Abcx"),
    ]);
    let matcher = Matcher::new(&reversed, config().with_similarity_cutoff(0.5)).unwrap();
    assert_eq!(matcher.resolve("abc").unwrap().record.unwrap().id_string(), "2");
}

#[test]
fn index_keeps_every_record() {
    let names = ["São Paulo", "Sao Paulo", "Campinas", "SAO PAULO", "", "Campinas"];
    let records: Vec<ReferenceRecord> = names
        .iter()
        .enumerate()
        .map(|(i, name)| ReferenceRecord::new(i as i64, *name))
        .collect();
    let index = RegistryIndex::new(records);

    let grouped: usize = index.groups().map(|group| group.len()).sum();
    assert_eq!(grouped, names.len());
    assert_eq!(index.group_count(), 3);
    assert_eq!(index.candidate_keys().count(), index.group_count());
    for group in index.groups() {
        for record in group.iter() {
            assert_eq!(&normalize(&record.name), group.key());
        }
    }
}

#[test]
fn malformed_entries_are_indexed_by_name() {
    let entries = [
        json!({ "id": 1, "nome": "Bonito", "microrregiao": "oops" }),
        json!({ "id": 2, "nome": "Bonito", "microrregiao": { "mesorregiao": { "UF": {
            "sigla": "SP", "regiao": { "nome": "Southeast" } } } } }),
        json!({ "id": 3, "nome": null }),
    ];
    let records: Vec<ReferenceRecord> = entries
        .into_iter()
        .map(|entry| ReferenceRecord::from_value(entry).unwrap())
        .collect();
    let index = RegistryIndex::new(records);
    assert_eq!(index.len(), 3);

    let (status, id) = resolve(&index, "bonito");
    assert_eq!(status, MatchStatus::Found);
    assert_eq!(id.as_deref(), Some("2"));

    // a non-string name folds to the empty key
    assert_eq!(index.lookup_exact("").map(|group| group.len()), Some(1));
}

#[test]
fn resolution_is_independent_of_call_order() {
    let index = RegistryIndex::new(vec![
        ReferenceRecord::new(1, "Curitiba"),
        ReferenceRecord::new(2, "Manaus"),
    ]);
    let matcher = Matcher::new(&index, config()).unwrap();
    let first = matcher.resolve("Manaos").unwrap();
    matcher.resolve("Curitba").unwrap();
    matcher.resolve("nowhere").unwrap();
    assert_eq!(matcher.resolve("Manaos").unwrap(), first);
}
