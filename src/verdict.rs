use serde::{Deserialize, Serialize};

use crate::error::{DetectorError, Result};

/// Probabilities at or above this are reported as authentic.
pub const VERDICT_THRESHOLD: f64 = 0.5;

/// An authentic verdict is high confidence strictly above this probability.
pub const HIGH_AUTHENTIC_THRESHOLD: f64 = 0.9;

/// A manipulated verdict is high confidence strictly below this probability.
pub const HIGH_MANIPULATED_THRESHOLD: f64 = 0.1;

const PROBABILITY_FLOOR: f64 = f64::MIN_POSITIVE;
const PROBABILITY_CEIL: f64 = 1.0 - f64::EPSILON / 2.0;

/// Logistic function, kept strictly inside `(0, 1)` for every finite logit.
pub fn sigmoid(logit: f64) -> f64 {
    let p = if logit >= 0.0 {
        1.0 / (1.0 + (-logit).exp())
    } else {
        let e = logit.exp();
        e / (1.0 + e)
    };

    p.clamp(PROBABILITY_FLOOR, PROBABILITY_CEIL)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Authentic,
    Manipulated,
}

impl Verdict {
    pub fn from_probability(probability: f64) -> Self {
        if probability >= VERDICT_THRESHOLD {
            Verdict::Authentic
        } else {
            Verdict::Manipulated
        }
    }

    pub fn is_authentic(&self) -> bool {
        matches!(self, Verdict::Authentic)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfidenceBand {
    High,
    Moderate,
}

impl ConfidenceBand {
    /// Bands are fixed cutoffs per verdict, not a symmetric interval around 0.5.
    pub fn classify(verdict: Verdict, probability: f64) -> Self {
        let high = match verdict {
            Verdict::Authentic => probability > HIGH_AUTHENTIC_THRESHOLD,
            Verdict::Manipulated => probability < HIGH_MANIPULATED_THRESHOLD,
        };

        if high {
            ConfidenceBand::High
        } else {
            ConfidenceBand::Moderate
        }
    }
}

/// Outcome of one classification. Only obtainable through the validating
/// constructors, so the verdict and band always agree with the probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InferenceResult {
    verdict: Verdict,
    raw_probability: f64,
    confidence_band: ConfidenceBand,
}

impl InferenceResult {
    pub fn from_probability(probability: f64) -> Result<Self> {
        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(DetectorError::Inference(format!(
                "probability {probability} is outside [0, 1]"
            )));
        }

        let verdict = Verdict::from_probability(probability);

        Ok(Self {
            verdict,
            raw_probability: probability,
            confidence_band: ConfidenceBand::classify(verdict, probability),
        })
    }

    pub fn from_logit(logit: f64) -> Result<Self> {
        if !logit.is_finite() {
            return Err(DetectorError::Inference(format!(
                "non-finite logit ({logit})"
            )));
        }

        Self::from_probability(sigmoid(logit))
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Probability that the image is authentic.
    pub fn raw_probability(&self) -> f64 {
        self.raw_probability
    }

    pub fn confidence_band(&self) -> ConfidenceBand {
        self.confidence_band
    }

    /// Confidence in the stated verdict as a whole percentage.
    pub fn confidence_percent(&self) -> u8 {
        let confidence = match self.verdict {
            Verdict::Authentic => self.raw_probability,
            Verdict::Manipulated => 1.0 - self.raw_probability,
        };

        (confidence * 100.0).round().clamp(0.0, 100.0) as u8
    }
}
