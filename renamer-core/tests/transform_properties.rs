//! Properties of the name transformer and of reconciliation
//!
//! These exercise the public API only: `transform`, `RenameRule` and `Batch`.

use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use renamer_core::{transform, Batch, FileSource, ImportedFile, RenameRule, RuleKind};

fn any_name() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 _.()\\[\\]$^+-]{0,24}"
}

fn any_rule() -> impl Strategy<Value = RenameRule> {
    (
        proptest::sample::select(RuleKind::ALL.to_vec()),
        "[A-Za-z0-9._()\\[]{0,4}",
        "[A-Za-z0-9_$]{0,4}",
        any::<bool>(),
    )
        .prop_map(|(kind, find, replace, use_regex)| {
            RenameRule::new(kind, find, replace).with_regex(use_regex)
        })
}

fn imported(name: &str) -> ImportedFile {
    ImportedFile {
        name: name.to_string(),
        relative_path: format!("dir/{}", name),
        source: FileSource::writable(format!("/tmp/dir/{}", name)),
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

    #[test]
    fn inactive_rule_is_identity(name in any_name(), rule in any_rule()) {
        let rule = rule.active(false);
        prop_assert_eq!(transform(&name, &rule), name);
    }

    #[test]
    fn prepend_concatenates(name in any_name(), text in "[A-Za-z0-9_.-]{0,8}") {
        prop_assert_eq!(
            transform(&name, &RenameRule::prepend(text.clone())),
            format!("{}{}", text, name)
        );
    }

    #[test]
    fn append_inserts_before_last_dot(
        stem in "[A-Za-z0-9_.-]{0,10}",
        ext in "[A-Za-z0-9_-]{0,5}",
        text in "[A-Za-z0-9_.-]{0,6}",
    ) {
        let name = format!("{}.{}", stem, ext);
        let output = transform(&name, &RenameRule::append(text.clone()));
        prop_assert_eq!(output, format!("{}{}.{}", stem, text, ext));
    }

    #[test]
    fn literal_remove_leaves_no_occurrence(
        pieces in proptest::collection::vec("[a-z0-9 _-]{0,6}", 1..5),
        find in "[.*+?^$(){}|\\[\\]\\\\XYZ]{1,3}",
    ) {
        let name = pieces.join(&find);
        let output = transform(&name, &RenameRule::remove(find.clone()));
        prop_assert!(!output.contains(&find));
        prop_assert_eq!(output, pieces.concat());
    }

    #[test]
    fn literal_replace_matches_str_replace(
        pieces in proptest::collection::vec("[a-z0-9 _-]{0,6}", 1..5),
        find in "[.*+?^$(){}|\\[\\]\\\\XYZ]{1,3}",
        replacement in "[A-Za-z0-9$_]{0,4}",
    ) {
        let name = pieces.join(&find);
        let output = transform(&name, &RenameRule::replace(find.clone(), replacement.clone()));
        prop_assert_eq!(output, name.replace(&find, &replacement));
    }

    #[test]
    fn empty_find_is_noop(name in any_name(), replace in "[a-z]{0,4}", use_regex in any::<bool>()) {
        for kind in [RuleKind::Replace, RuleKind::Remove, RuleKind::Regex] {
            let rule = RenameRule::new(kind, "", replace.clone()).with_regex(use_regex);
            prop_assert_eq!(transform(&name, &rule), name.clone());
        }
    }

    #[test]
    fn reconcile_is_idempotent(names in proptest::collection::vec(any_name(), 0..8), rule in any_rule()) {
        let mut batch = Batch::new(rule);
        batch.import_scan(names.iter().map(|n| imported(n)));
        let first: Vec<String> = batch.records().iter().map(|r| r.new_name.clone()).collect();
        batch.reconcile();
        let second: Vec<String> = batch.records().iter().map(|r| r.new_name.clone()).collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn picker_and_scan_imports_converge(names in proptest::collection::vec(any_name(), 0..8), rule in any_rule()) {
        let mut picked = Batch::new(rule.clone());
        picked.import_files(names.iter().map(|n| imported(n)));
        let mut scanned = Batch::new(rule);
        scanned.import_scan(names.iter().map(|n| imported(n)));

        let picked_names: Vec<&str> = picked.records().iter().map(|r| r.new_name.as_str()).collect();
        let scanned_names: Vec<&str> = scanned.records().iter().map(|r| r.new_name.as_str()).collect();
        prop_assert_eq!(picked_names, scanned_names);
    }

    #[test]
    fn success_survives_rule_changes(
        name in "[a-z]{1,8}\\.txt",
        first in any_rule(),
        later in proptest::collection::vec(any_rule(), 1..4),
    ) {
        let mut batch = Batch::new(first);
        let id = batch.import_files(vec![imported(&name)])[0];
        batch.mark_success(id);
        let committed = batch.get(id).unwrap().new_name.clone();

        for rule in later {
            batch.set_rule(rule);
            prop_assert_eq!(&batch.get(id).unwrap().new_name, &committed);
        }
    }
}
