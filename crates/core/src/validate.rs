//! Parameter validation against the capability registry.

use crate::{Error, Model, Parameter, PromptError, Result, Tunables, Violation};
use std::ops::RangeInclusive;

/// Check the supplied tunables and prompt against `model`'s declared ranges.
///
/// Only fields that are present are checked; nothing is defaulted. The first
/// violation found is returned.
pub fn validate(model: &Model, tunables: &Tunables, prompt: Option<&str>) -> Result<()> {
    if let Some(max_tokens) = tunables.max_tokens {
        check_max_tokens(model, max_tokens)?;
    }
    if let Some(temperature) = tunables.temperature {
        check_float(Parameter::Temperature, &model.temperature, temperature)?;
    }
    if let Some(top_p) = tunables.top_p {
        check_float(Parameter::TopP, &model.top_p, top_p)?;
    }
    if let Some(sequences) = &tunables.stop_sequences {
        check_stop_sequences(model, sequences)?;
    }
    if let Some(prompt) = prompt {
        check_prompt(model, prompt)?;
    }
    Ok(())
}

fn check_max_tokens(model: &Model, value: i64) -> Result<()> {
    if value <= 0 {
        return Err(Error::parameter(
            Parameter::MaxTokens,
            Violation::NonPositive(value),
        ));
    }

    match &model.max_tokens {
        Some(range) if !range.contains(&value) => Err(Error::parameter(
            Parameter::MaxTokens,
            Violation::OutOfRange {
                value: value as f64,
                min: *range.start() as f64,
                max: *range.end() as f64,
            },
        )),
        _ => Ok(()),
    }
}

fn check_float(parameter: Parameter, range: &RangeInclusive<f64>, value: f64) -> Result<()> {
    if range.contains(&value) {
        return Ok(());
    }

    Err(Error::parameter(
        parameter,
        Violation::OutOfRange {
            value,
            min: *range.start(),
            max: *range.end(),
        },
    ))
}

fn check_stop_sequences(model: &Model, sequences: &[String]) -> Result<()> {
    if sequences.is_empty() {
        return Ok(());
    }
    if model.stop_sequences == 0 {
        return Err(Error::parameter(
            Parameter::StopSequences,
            Violation::Unsupported,
        ));
    }
    if sequences.len() > model.stop_sequences {
        return Err(Error::parameter(
            Parameter::StopSequences,
            Violation::TooMany {
                count: sequences.len(),
                max: model.stop_sequences,
            },
        ));
    }
    if let Some(position) = sequences.iter().position(String::is_empty) {
        return Err(Error::parameter(
            Parameter::StopSequences,
            Violation::EmptyStopSequence(position),
        ));
    }
    Ok(())
}

fn check_prompt(model: &Model, prompt: &str) -> Result<()> {
    if prompt.is_empty() {
        return Err(PromptError::Empty.into());
    }

    if let Some(limit) = model.prompt {
        let len = limit.measure(prompt);
        if len > limit.max() {
            return Err(PromptError::TooLong {
                len,
                max: limit.max(),
            }
            .into());
        }
    }
    Ok(())
}
