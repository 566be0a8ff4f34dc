//! Frozen MoA-aware logistic scorer.
//!
//! The model is trained offline (overlap + PPI + MoA features, standard
//! scaling, logistic regression); the fitted parameters are frozen here
//! for fast, reproducible inference. The model is an explicit immutable
//! object constructed once and passed by reference to the scoring call,
//! never process-wide state, so alternative parameter sets can be loaded
//! from JSON and swapped in without touching this module.

use std::path::Path;

use serde::{Deserialize, Serialize};

use remedyx_common::{RemedyxError, Result};

/// Feature order expected by the frozen parameters. Must not be reordered
/// independently of the fitted arrays.
pub const FEATURE_COLS_MOA: [&str; 8] = [
    "log1p_n_overlap",
    "drug_deg",
    "disease_deg",
    "frac_drug_covered",
    "frac_disease_covered",
    "ppi_proximity",
    "n_moa_targets",
    "drug_has_moa",
];

/// Per-pair feature vector for the MoA model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoaFeatures {
    /// ln(1 + n_overlap)
    pub log1p_n_overlap: f64,
    /// Number of distinct target genes of the drug.
    pub drug_deg: f64,
    /// Number of distinct genes associated with the disease.
    pub disease_deg: f64,
    /// Fraction of the drug's targets shared with the disease.
    pub frac_drug_covered: f64,
    /// Fraction of the disease's genes shared with the drug.
    pub frac_disease_covered: f64,
    /// Proximity score from the PPI scorer.
    pub ppi_proximity: f64,
    /// Number of curated mechanism-of-action targets for the drug.
    pub n_moa_targets: f64,
    /// 1.0 when the drug has any curated MoA record, else 0.0.
    pub drug_has_moa: f64,
}

impl MoaFeatures {
    /// Features in [`FEATURE_COLS_MOA`] order.
    pub fn as_array(&self) -> [f64; 8] {
        [
            self.log1p_n_overlap,
            self.drug_deg,
            self.disease_deg,
            self.frac_drug_covered,
            self.frac_disease_covered,
            self.ppi_proximity,
            self.n_moa_targets,
            self.drug_has_moa,
        ]
    }
}

/// Immutable standard-scaling + logistic-regression parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrozenMoaModel {
    pub scaler_mean: [f64; 8],
    pub scaler_scale: [f64; 8],
    pub coefficients: [f64; 8],
    pub intercept: f64,
}

impl Default for FrozenMoaModel {
    /// Parameters from the frozen training run, in [`FEATURE_COLS_MOA`]
    /// order.
    fn default() -> Self {
        Self {
            scaler_mean: [
                0.767_705_703_669_69,
                2.160_280_313_745_660_3,
                866.338_616_004_457_5,
                0.837_543_423_121_261_6,
                0.032_570_881_299_623_856,
                0.341_604_828_395_676_46,
                0.390_231_880_330_890_24,
                0.100_113_582_786_850_12,
            ],
            scaler_scale: [
                0.241_137_126_499_187_9,
                4.125_444_617_342_613,
                1_346.440_724_519_752_2,
                0.278_429_392_221_963_94,
                0.105_273_750_443_613_69,
                0.068_050_675_623_039_7,
                2.165_390_838_885_271_4,
                0.300_151_384_018_849_17,
            ],
            coefficients: [
                0.560_659_606_118_906_3,
                -0.178_593_012_226_616_53,
                0.261_483_485_003_830_9,
                0.032_090_031_835_403_81,
                -0.393_188_637_603_534_2,
                0.444_482_493_201_548_37,
                0.030_300_249_073_566_703,
                4.429_415_288_172_351,
            ],
            intercept: -8.717_857_947_648_007,
        }
    }
}

impl FrozenMoaModel {
    /// Load alternative parameters from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| {
            RemedyxError::Config(format!("invalid model file {}: {e}", path.display()))
        })
    }

    /// Probability-like score in [0, 1] for one pair.
    pub fn score(&self, features: &MoaFeatures) -> f64 {
        let x = features.as_array();
        let mut logit = self.intercept;
        for k in 0..x.len() {
            let scaled = (x[k] - self.scaler_mean[k]) / self.scaler_scale[k];
            logit += scaled * self.coefficients[k];
        }
        sigmoid(logit)
    }

    /// Score a batch in input order.
    pub fn score_batch(&self, features: &[MoaFeatures]) -> Vec<f64> {
        features.iter().map(|f| self.score(f)).collect()
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
