//! Small data sets shared by the unit tests.
use crate::feature::{Feature, FeatureGenerator, FeatureKind};
use crate::record::Record;

pub const AGE: &str = "age";
pub const SALARY: &str = "salary";
pub const SEX: &str = "sex";

/// Ten applicants described by age, salary and sex, labeled good or bad.
pub fn applicants() -> Vec<Record<&'static str>> {
    let age = FeatureGenerator::new(AGE, FeatureKind::Continuous);
    let salary = FeatureGenerator::new(SALARY, FeatureKind::Continuous);
    let sex = FeatureGenerator::new(SEX, FeatureKind::Discrete);
    [
        (25, 50_000, "female", "good"),
        (51, 45_816, "male", "bad"),
        (42, 75_491, "male", "good"),
        (36, 15_034, "female", "bad"),
        (21, 65_500, "female", "good"),
        (62, 35_000, "male", "bad"),
        (23, 74_154, "male", "bad"),
        (56, 120_000, "female", "good"),
        (34, 25_150, "male", "bad"),
        (28, 165_000, "male", "good"),
    ]
    .into_iter()
    .map(|(a, s, x, target)| {
        Record::labeled(vec![age.generate(a), salary.generate(s), sex.generate(x)], target).unwrap()
    })
    .collect()
}

/// The held-out applicant.
pub fn applicant_query() -> Record<&'static str> {
    Record::query(vec![
        Feature::continuous(AGE, 30),
        Feature::continuous(SALARY, 40_816),
        Feature::discrete(SEX, "female"),
    ])
    .unwrap()
}

/// A single continuous column `x` holding `values`, labeled by `targets`.
pub fn column(values: &[i64], targets: &[&'static str]) -> Vec<Record<&'static str>> {
    values
        .iter()
        .zip(targets)
        .map(|(v, t)| Record::labeled(vec![Feature::continuous("x", *v)], *t).unwrap())
        .collect()
}
