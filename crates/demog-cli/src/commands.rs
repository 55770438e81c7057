use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use demog_cli::ingest::{read_csv, read_keywords};
use demog_cli::output::write_annotated_file;
use demog_cli::summary::{explain_table, keywords_table, print_summary};
use demog_match::BatchClassifier;
use demog_model::{Algorithm, MatchConfig, Threshold, Vocabulary};

use crate::cli::{ClassifyArgs, ExplainArgs, MatchArgs, VocabularyArg, VocabularyArgs};

pub fn run_classify(args: &ClassifyArgs) -> Result<()> {
    let span = info_span!("classify", input = %args.input.display());
    let _guard = span.enter();

    let config = resolve_config(&args.matching)?;
    let vocabulary = resolve_vocabulary(&args.vocabulary)?;
    let classifier = BatchClassifier::new(config, vocabulary)?;
    let dataset = read_csv(&args.input)?;

    let classification = if args.parallel {
        classifier.classify_parallel(&dataset.records)?
    } else {
        classifier.classify(&dataset.records)?
    };
    info!(
        matched = classification.stats.matched,
        total = classification.stats.total,
        "classification complete"
    );

    if let Some(path) = &args.output {
        if args.all {
            write_annotated_file(path, &dataset.columns, &classification.records)?;
        } else {
            write_annotated_file(path, &dataset.columns, classification.matched())?;
        }
    }

    if args.json {
        let json = serde_json::to_string_pretty(&classification.stats)
            .context("serialize statistics")?;
        println!("{json}");
    } else {
        print_summary(&classification.stats);
    }
    Ok(())
}

pub fn run_keywords(args: &VocabularyArgs) -> Result<()> {
    let vocabulary = resolve_vocabulary(args)?;
    println!("{}", keywords_table(&vocabulary));
    println!("{} keyword(s)", vocabulary.len());
    Ok(())
}

pub fn run_explain(args: &ExplainArgs) -> Result<()> {
    let config = resolve_config(&args.matching)?;
    let vocabulary = resolve_vocabulary(&args.vocabulary)?;
    let classifier = BatchClassifier::new(config, vocabulary)?;
    let matcher = classifier.matcher();

    let result = matcher.classify(Some(args.text.as_str()));
    let scores = matcher.score_all(&args.text);
    println!("{}", explain_table(&scores, matcher.threshold()));
    match &result.best_keyword {
        Some(keyword) => println!(
            "Best keyword: {keyword} ({}%) - {}",
            result.best_score,
            if result.matched { "MATCH" } else { "NO MATCH" }
        ),
        None => println!("No keyword scored (empty text or vocabulary)"),
    }
    Ok(())
}

/// Config file first, then individual flags on top.
pub fn resolve_config(args: &MatchArgs) -> Result<MatchConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => MatchConfig::default(),
    };
    if let Some(name) = &args.algorithm {
        config.algorithm = name.parse::<Algorithm>()?;
    }
    if let Some(threshold) = args.threshold {
        config.threshold = Threshold::new(threshold)?;
    }
    if let Some(field) = &args.text_field {
        config.text_field = field.clone();
    }
    if let Some(field) = &args.group_field {
        config.group_field = field.clone();
    }
    config.validate()?;
    Ok(config)
}

fn load_config(path: &Path) -> Result<MatchConfig> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse config {}", path.display()))
}

pub fn resolve_vocabulary(args: &VocabularyArgs) -> Result<Vocabulary> {
    let mut vocabulary = if args.custom_only {
        Vocabulary::new()
    } else {
        match args.vocabulary {
            VocabularyArg::Demographic => Vocabulary::demographic(),
            VocabularyArg::Extended => Vocabulary::extended(),
        }
    };
    if let Some(path) = &args.keywords {
        vocabulary.extend(read_keywords(path)?);
    }
    Ok(vocabulary)
}

#[cfg(test)]
mod tests {
    use demog_model::DemogError;

    use super::*;

    fn match_args() -> MatchArgs {
        MatchArgs {
            config: None,
            algorithm: None,
            threshold: None,
            text_field: None,
            group_field: None,
        }
    }

    #[test]
    fn flags_override_defaults() {
        let args = MatchArgs {
            algorithm: Some("token-set-ratio".to_string()),
            threshold: Some(90),
            text_field: Some("description".to_string()),
            ..match_args()
        };
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.algorithm, Algorithm::TokenSetRatio);
        assert_eq!(config.threshold.value(), 90);
        assert_eq!(config.text_field, "description");
        assert_eq!(config.group_field, "table_name");
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let args = MatchArgs {
            threshold: Some(101),
            ..match_args()
        };
        let err = resolve_config(&args).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DemogError>(),
            Some(DemogError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn unknown_algorithm_is_rejected() {
        let args = MatchArgs {
            algorithm: Some("soundex".to_string()),
            ..match_args()
        };
        assert!(resolve_config(&args).is_err());
    }

    #[test]
    fn extended_vocabulary_selected() {
        let args = VocabularyArgs {
            vocabulary: VocabularyArg::Extended,
            keywords: None,
            custom_only: false,
        };
        let vocabulary = resolve_vocabulary(&args).unwrap();
        assert_eq!(vocabulary.len(), Vocabulary::extended().len());
    }
}
