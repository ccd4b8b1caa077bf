use crate::batch::Batch;
use crate::output::SuggestResult;
use crate::synth::RuleSynthesizer;

/// Ask `synth` for a rule and, when one comes back, make it the batch rule.
///
/// Without a usable rule the batch keeps its current rule.
pub fn suggest_operation(
    batch: &mut Batch,
    synth: &dyn RuleSynthesizer,
    instruction: &str,
) -> SuggestResult {
    let rule = synth.synthesize(instruction);

    let stats = rule.as_ref().map(|rule| {
        batch.set_rule(rule.clone());
        batch.stats()
    });

    SuggestResult {
        instruction: instruction.to_string(),
        rule,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::ImportedFile;
    use crate::record::FileSource;
    use crate::rule::RenameRule;
    use crate::synth::Unavailable;

    struct Fixed(Option<RenameRule>);

    impl RuleSynthesizer for Fixed {
        fn synthesize(&self, _instruction: &str) -> Option<RenameRule> {
            self.0.clone()
        }
    }

    fn batch() -> Batch {
        let mut batch = Batch::new(RenameRule::prepend("keep_"));
        batch.import_files(vec![ImportedFile {
            name: "2023-01-05 report.pdf".to_string(),
            relative_path: "2023-01-05 report.pdf".to_string(),
            source: FileSource::detached("/tmp/report.pdf"),
        }]);
        batch
    }

    #[test]
    fn test_suggestion_replaces_rule() {
        let mut batch = batch();
        let synth = Fixed(Some(RenameRule::regex(r"^\d{4}-\d{2}-\d{2} ", "")));
        let result = suggest_operation(&mut batch, &synth, "remove the date");

        assert!(result.rule.is_some());
        assert_eq!(result.stats.unwrap().changed, 1);
        assert_eq!(batch.records()[0].new_name, "report.pdf");
    }

    #[test]
    fn test_no_suggestion_keeps_rule() {
        let mut batch = batch();
        let result = suggest_operation(&mut batch, &Unavailable, "remove the date");

        assert!(result.rule.is_none());
        assert!(result.stats.is_none());
        assert_eq!(batch.rule(), &RenameRule::prepend("keep_"));
        assert_eq!(batch.records()[0].new_name, "keep_2023-01-05 report.pdf");
    }
}
