//! Keyword classification of affiliation strings.
//!
//! Both predicates lower-case the affiliation and look for any keyword as a plain
//! substring. There is no tokenization, so `"lab"` also matches `"laboratory"` and
//! `"collaborative"`. The two predicates are independent: an affiliation may be
//! academic, commercial, both, or neither.

/// Keywords marking an academic or clinical institution.
pub const ACADEMIC_KEYWORDS: &[&str] = &[
  "university",
  "college",
  "institute",
  "academy",
  "hospital",
  "school",
  "lab",
  "research center",
  "department",
];

/// Keywords marking a commercial organization.
pub const COMPANY_KEYWORDS: &[&str] = &[
  "pharmaceutical",
  "biotech",
  "pharma",
  "bio-tech",
  "genetics",
  "inc.",
  "ltd",
  "company",
  "corporation",
  "plc",
];

fn contains_any(affiliation: &str, keywords: &[&str]) -> bool {
  let lower = affiliation.to_lowercase();
  keywords.iter().any(|keyword| lower.contains(keyword))
}

/// Whether the affiliation mentions an academic keyword.
pub fn is_academic(affiliation: &str) -> bool { contains_any(affiliation, ACADEMIC_KEYWORDS) }

/// Whether the affiliation mentions a commercial keyword.
pub fn is_company(affiliation: &str) -> bool { contains_any(affiliation, COMPANY_KEYWORDS) }
