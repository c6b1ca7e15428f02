pub const ATTRIBUTE_COUNT: usize = 37;

/// The fixed attribute vocabulary, in the classifier's output order
/// (CelebA labels minus the three the model was not trained on).
pub const ATTRIBUTE_NAMES: [&str; ATTRIBUTE_COUNT] = [
    "5_o_Clock_Shadow",
    "Arched_Eyebrows",
    "Bags_Under_Eyes",
    "Bald",
    "Bangs",
    "Big_Lips",
    "Big_Nose",
    "Black_Hair",
    "Blond_Hair",
    "Brown_Hair",
    "Bushy_Eyebrows",
    "Chubby",
    "Double_Chin",
    "Eyeglasses",
    "Goatee",
    "Gray_Hair",
    "Heavy_Makeup",
    "High_Cheekbones",
    "Male",
    "Mouth_Slightly_Open",
    "Mustache",
    "Narrow_Eyes",
    "No_Beard",
    "Oval_Face",
    "Pointy_Nose",
    "Receding_Hairline",
    "Rosy_Cheeks",
    "Sideburns",
    "Smiling",
    "Straight_Hair",
    "Wavy_Hair",
    "Wearing_Earrings",
    "Wearing_Hat",
    "Wearing_Lipstick",
    "Wearing_Necklace",
    "Wearing_Necktie",
    "Young",
];

/// Labels implied by the absence of a positive counterpart.
const COMPLEMENTS: [(&str, &str); 3] = [
    ("Male", "Female"),
    ("No_Beard", "Beard"),
    ("Young", "Old"),
];

/// The attribute set predicted for one face.
///
/// `labels` holds the vocabulary entries whose score met the threshold,
/// in vocabulary order, followed by any complement labels.
#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
    pub labels: Vec<&'static str>,
    pub scores: Vec<f32>,
}

impl Prediction {
    /// Thresholds raw classifier scores and applies the complement rule.
    ///
    /// Scores at or above `threshold` count as present. A complement label
    /// is appended iff its positive counterpart is absent.
    pub fn from_scores(scores: &[f32], threshold: f32) -> Self {
        debug_assert_eq!(scores.len(), ATTRIBUTE_COUNT);

        let mut labels: Vec<&'static str> = ATTRIBUTE_NAMES
            .iter()
            .zip(scores)
            .filter(|(_, &score)| score >= threshold)
            .map(|(&name, _)| name)
            .collect();

        for (positive, complement) in COMPLEMENTS {
            if !labels.contains(&positive) {
                labels.push(complement);
            }
        }

        Prediction {
            labels,
            scores: scores.to_vec(),
        }
    }
}
