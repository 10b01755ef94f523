pub mod rules;
pub mod select;

pub use rules::{
    Classifier, ClassificationRule, Matcher, RuleOverrides, CACHE_DIR_FRAGMENTS, TEMP_SUFFIXES,
    UPDATE_EXTENSIONS,
};
pub use select::{select_auto_clean, AutoCleanSelector, AUTO_CLEAN_DIR_MARKERS};
