//! Credential archetype classification.
//!
//! Attribute names come from issuers outside our control, so the
//! classification is fuzzy. Every alias and rule lives in the tables below;
//! the matching code never names a specific attribute.

use serde::{Deserialize, Serialize};

use super::CredentialAttribute;

/// Card layout chosen for a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    /// Academic transcript.
    Transcript,
    /// Student or member identity card.
    IdentityCard,
    /// Generic attribute list.
    Default,
}

/// Semantic role of a field extracted for a card layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardFieldRole {
    /// Holder's full name.
    FullName,
    /// Student or member number.
    MemberId,
    /// Issuing school or organisation.
    Institution,
    /// Programme of study.
    Program,
    /// Grade point average.
    Gpa,
    /// Year studies started.
    YearStart,
    /// Year studies ended.
    YearEnd,
    /// Card expiry date.
    ExpiryDate,
}

const YEAR_START_ALIASES: &[&str] = &["yearstart", "year_start", "startyear", "start_year"];
const YEAR_END_ALIASES: &[&str] = &["yearend", "year_end", "endyear", "end_year"];
const MEMBER_ID_ALIASES: &[&str] = &[
    "studentid",
    "student_id",
    "studentnumber",
    "student_number",
    "memberid",
    "member_id",
];
const FULL_NAME_ALIASES: &[&str] = &[
    "fullname",
    "full_name",
    "studentfullname",
    "student_full_name",
];
const FIRST_NAME_ALIASES: &[&str] = &["firstname", "first_name", "givenname", "given_name"];
const LAST_NAME_ALIASES: &[&str] = &[
    "lastname",
    "last_name",
    "familyname",
    "family_name",
    "surname",
];
const INSTITUTION_ALIASES: &[&str] = &[
    "school",
    "schoolname",
    "school_name",
    "institution",
    "institutionname",
    "institution_name",
    "college",
];
const PROGRAM_ALIASES: &[&str] = &["program", "programname", "program_name", "degree", "major"];
const GPA_ALIASES: &[&str] = &[
    "gpa",
    "termgpa",
    "term_gpa",
    "cumulativegpa",
    "cumulative_gpa",
];
const EXPIRY_ALIASES: &[&str] = &[
    "expiry",
    "expirydate",
    "expiry_date",
    "expiration",
    "expirationdate",
    "expiration_date",
];

/// Predicate over a lowercased attribute name.
#[derive(Debug, Clone, Copy)]
enum NameMatcher {
    Contains(&'static str),
    OneOf(&'static [&'static str]),
}

impl NameMatcher {
    fn matches(self, lowered_name: &str) -> bool {
        match self {
            Self::Contains(fragment) => lowered_name.contains(fragment),
            Self::OneOf(aliases) => aliases.contains(&lowered_name),
        }
    }
}

/// One way of satisfying an archetype rule.
#[derive(Debug, Clone, Copy)]
enum Clause {
    /// Some attribute matches.
    AnyAttribute(NameMatcher),
    /// Every matcher is satisfied by some attribute.
    AllAttributes(&'static [NameMatcher]),
    /// The subject identifier contains the fragment.
    SubjectContains(&'static str),
    /// The subject identifier contains a configured issuer fragment.
    SubjectMatchesIssuer,
}

/// An archetype and the clauses that select it; any clause suffices.
struct ArchetypeRule {
    archetype: Archetype,
    clauses: &'static [Clause],
}

/// Rules in priority order; the first rule with a satisfied clause wins.
const RULES: &[ArchetypeRule] = &[
    ArchetypeRule {
        archetype: Archetype::Transcript,
        clauses: &[
            Clause::AnyAttribute(NameMatcher::Contains("gpa")),
            Clause::AnyAttribute(NameMatcher::OneOf(YEAR_START_ALIASES)),
            Clause::SubjectContains("transcript"),
        ],
    },
    ArchetypeRule {
        archetype: Archetype::IdentityCard,
        clauses: &[
            Clause::AllAttributes(&[
                NameMatcher::OneOf(MEMBER_ID_ALIASES),
                NameMatcher::OneOf(FULL_NAME_ALIASES),
            ]),
            Clause::AllAttributes(&[
                NameMatcher::OneOf(MEMBER_ID_ALIASES),
                NameMatcher::OneOf(FIRST_NAME_ALIASES),
                NameMatcher::OneOf(LAST_NAME_ALIASES),
            ]),
            Clause::SubjectMatchesIssuer,
        ],
    },
];

const TRANSCRIPT_FIELDS: &[(CardFieldRole, &[&str])] = &[
    (CardFieldRole::FullName, FULL_NAME_ALIASES),
    (CardFieldRole::Institution, INSTITUTION_ALIASES),
    (CardFieldRole::Program, PROGRAM_ALIASES),
    (CardFieldRole::Gpa, GPA_ALIASES),
    (CardFieldRole::YearStart, YEAR_START_ALIASES),
    (CardFieldRole::YearEnd, YEAR_END_ALIASES),
];

const IDENTITY_FIELDS: &[(CardFieldRole, &[&str])] = &[
    (CardFieldRole::FullName, FULL_NAME_ALIASES),
    (CardFieldRole::MemberId, MEMBER_ID_ALIASES),
    (CardFieldRole::Institution, INSTITUTION_ALIASES),
    (CardFieldRole::ExpiryDate, EXPIRY_ALIASES),
];

impl Archetype {
    /// Returns the field table for the archetype, in display order.
    ///
    /// Each entry pairs a role with its aliases; the first attribute whose
    /// lowercased name equals an alias fills the role. The default
    /// archetype has no table and lists every attribute instead.
    #[must_use]
    pub const fn field_table(self) -> &'static [(CardFieldRole, &'static [&'static str])] {
        match self {
            Self::Transcript => TRANSCRIPT_FIELDS,
            Self::IdentityCard => IDENTITY_FIELDS,
            Self::Default => &[],
        }
    }
}

/// Finds the first attribute whose lowercased name equals one of `aliases`.
///
/// Aliases are tried in order, so an earlier alias beats an earlier
/// attribute.
pub(crate) fn find_by_alias<'a>(
    attributes: &'a [CredentialAttribute],
    aliases: &[&str],
) -> Option<&'a CredentialAttribute> {
    aliases.iter().find_map(|alias| {
        attributes
            .iter()
            .find(|attribute| attribute.name.to_ascii_lowercase() == *alias)
    })
}

/// Composes a full name from first and last name attributes.
pub(crate) fn compose_full_name(attributes: &[CredentialAttribute]) -> Option<String> {
    let first = find_by_alias(attributes, FIRST_NAME_ALIASES)?;
    let last = find_by_alias(attributes, LAST_NAME_ALIASES)?;
    Some(format!("{} {}", first.value, last.value))
}

/// Archetype classification rules plus host-configured issuer fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchetypeRules {
    /// Subject identifier fragments of issuers known to issue identity
    /// cards. Matching is case-insensitive.
    pub identity_issuer_fragments: Vec<String>,
}

impl ArchetypeRules {
    /// Creates rules with the given identity issuer fragments.
    #[must_use]
    pub fn with_identity_issuer_fragments(
        fragments: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            identity_issuer_fragments: fragments.into_iter().map(Into::into).collect(),
        }
    }

    /// Classifies a credential by its subject identifier and attributes.
    #[must_use]
    pub fn classify(
        &self,
        subject_id: Option<&str>,
        attributes: &[CredentialAttribute],
    ) -> Archetype {
        let names: Vec<String> = attributes
            .iter()
            .map(|attribute| attribute.name.to_ascii_lowercase())
            .collect();
        let subject = subject_id.unwrap_or_default().to_ascii_lowercase();

        RULES
            .iter()
            .find(|rule| {
                rule.clauses
                    .iter()
                    .any(|clause| self.clause_holds(*clause, &subject, &names))
            })
            .map_or(Archetype::Default, |rule| rule.archetype)
    }

    fn clause_holds(&self, clause: Clause, subject: &str, names: &[String]) -> bool {
        let any_name = |matcher: NameMatcher| names.iter().any(|name| matcher.matches(name));
        match clause {
            Clause::AnyAttribute(matcher) => any_name(matcher),
            Clause::AllAttributes(matchers) => matchers.iter().all(|m| any_name(*m)),
            Clause::SubjectContains(fragment) => subject.contains(fragment),
            Clause::SubjectMatchesIssuer => self
                .identity_issuer_fragments
                .iter()
                .filter(|fragment| !fragment.is_empty())
                .any(|fragment| subject.contains(&fragment.to_ascii_lowercase())),
        }
    }
}

/// Classifies with the default rules and no configured issuers.
#[must_use]
pub fn classify_archetype(
    subject_id: Option<&str>,
    attributes: &[CredentialAttribute],
) -> Archetype {
    ArchetypeRules::default().classify(subject_id, attributes)
}
