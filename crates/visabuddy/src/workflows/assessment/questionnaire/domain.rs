use serde::{Deserialize, Serialize};

/// Requested visa category. Only the two categories the product serves today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisaType {
    Tourist,
    Student,
}

impl VisaType {
    pub const fn label(self) -> &'static str {
        match self {
            VisaType::Tourist => "tourist",
            VisaType::Student => "student",
        }
    }
}

/// Canonical five-bucket stay duration. Legacy coarse buckets map into these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StayDuration {
    #[serde(rename = "under_2_weeks")]
    UnderTwoWeeks,
    #[serde(rename = "2_4_weeks")]
    TwoToFourWeeks,
    #[serde(rename = "1_3_months")]
    OneToThreeMonths,
    #[serde(rename = "3_6_months")]
    ThreeToSixMonths,
    #[serde(rename = "over_6_months")]
    OverSixMonths,
}

impl StayDuration {
    /// Representative day count used when estimating required funds.
    pub const fn representative_days(self) -> u32 {
        match self {
            StayDuration::UnderTwoWeeks => 10,
            StayDuration::TwoToFourWeeks => 25,
            StayDuration::OneToThreeMonths => 50,
            StayDuration::ThreeToSixMonths => 120,
            StayDuration::OverSixMonths => 200,
        }
    }
}

/// Who pays for the trip or study plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SponsorType {
    #[serde(rename = "self")]
    SelfFunded,
    Family,
    Employer,
    Scholarship,
    Other,
}

impl SponsorType {
    pub const fn is_self_funded(self) -> bool {
        matches!(self, SponsorType::SelfFunded)
    }
}

/// Applicant's current occupation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    Employed,
    SelfEmployed,
    Student,
    Unemployed,
    Retired,
}

impl EmploymentStatus {
    /// True for statuses that anchor the applicant to a workplace at home.
    pub const fn is_working(self) -> bool {
        matches!(self, EmploymentStatus::Employed | EmploymentStatus::SelfEmployed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccommodationType {
    Hotel,
    Rental,
    FamilyOrFriends,
    UniversityHousing,
    Other,
}

/// Declared source of trip funding, distinct from the sponsor relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundingSource {
    PersonalSavings,
    FamilySupport,
    Employer,
    Scholarship,
    Loan,
}

/// Compact bitset of supporting documents the applicant reports possessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentSet(u32);

impl DocumentSet {
    pub const PASSPORT: u32 = 1 << 0;
    pub const BANK_STATEMENT: u32 = 1 << 1;
    pub const EMPLOYMENT_LETTER: u32 = 1 << 2;
    pub const PROPERTY_DEED: u32 = 1 << 3;
    pub const INVITATION_LETTER: u32 = 1 << 4;
    pub const TRAVEL_INSURANCE: u32 = 1 << 5;
    pub const ENROLLMENT_PROOF: u32 = 1 << 6;
    pub const SPONSOR_CONSENT: u32 = 1 << 7;

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn contains(self, flag: u32) -> bool {
        self.0 & flag == flag && flag != 0
    }

    pub fn insert(&mut self, flag: u32) {
        self.0 |= flag;
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Wire name → flag. Unknown names return `None` so callers can record a
    /// warning instead of dropping data silently.
    pub fn flag_for(name: &str) -> Option<u32> {
        match name {
            "passport" => Some(Self::PASSPORT),
            "bank_statement" => Some(Self::BANK_STATEMENT),
            "employment_letter" => Some(Self::EMPLOYMENT_LETTER),
            "property_deed" => Some(Self::PROPERTY_DEED),
            "invitation_letter" => Some(Self::INVITATION_LETTER),
            "travel_insurance" => Some(Self::TRAVEL_INSURANCE),
            "enrollment_proof" => Some(Self::ENROLLMENT_PROOF),
            "sponsor_consent" => Some(Self::SPONSOR_CONSENT),
            _ => None,
        }
    }
}

/// The canonical, fully-normalized questionnaire record.
///
/// `visa_type` and `target_country` are always present and non-empty; every
/// other field is optional and carries an explicit default at the point of
/// consumption, so no downstream calculator may fail on absence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireSummary {
    pub visa_type: VisaType,
    pub target_country: String,
    pub app_language: String,

    pub citizenship: Option<String>,
    pub age: Option<u8>,
    pub marital_status: Option<MaritalStatus>,
    pub has_children: Option<bool>,

    pub monthly_income_usd: Option<f64>,
    pub bank_balance_usd: Option<f64>,
    pub sponsor_type: Option<SponsorType>,
    pub sponsor_monthly_income_usd: Option<f64>,
    pub sponsor_bank_balance_usd: Option<f64>,

    pub employment_status: Option<EmploymentStatus>,
    pub employer: Option<String>,
    pub study_program: Option<String>,
    pub employment_tenure_months: Option<u32>,

    pub stay_duration: Option<StayDuration>,
    pub funding_source: Option<FundingSource>,
    pub accommodation: Option<AccommodationType>,

    pub visited_countries: Vec<String>,
    pub visa_refusal_count: u32,
    pub has_overstayed: bool,
    pub has_traveled_abroad: Option<bool>,

    pub owns_property: Option<bool>,
    pub family_in_home_country: Option<bool>,

    pub documents: DocumentSet,
}

impl QuestionnaireSummary {
    /// Fully-defaulted summary used when no questionnaire is available.
    pub fn missing(visa_type: VisaType, target_country: &str, app_language: &str) -> Self {
        Self {
            visa_type,
            target_country: target_country.to_string(),
            app_language: app_language.to_string(),
            citizenship: None,
            age: None,
            marital_status: None,
            has_children: None,
            monthly_income_usd: None,
            bank_balance_usd: None,
            sponsor_type: None,
            sponsor_monthly_income_usd: None,
            sponsor_bank_balance_usd: None,
            employment_status: None,
            employer: None,
            study_program: None,
            employment_tenure_months: None,
            stay_duration: None,
            funding_source: None,
            accommodation: None,
            visited_countries: Vec::new(),
            visa_refusal_count: 0,
            has_overstayed: false,
            has_traveled_abroad: None,
            owns_property: None,
            family_in_home_country: None,
            documents: DocumentSet::empty(),
        }
    }

    /// Sponsor relationship with the conservative default: unknown means
    /// self-funded.
    pub fn effective_sponsor(&self) -> SponsorType {
        self.sponsor_type.unwrap_or(SponsorType::SelfFunded)
    }

    /// Employment status with the conservative default: unknown means
    /// unemployed.
    pub fn effective_employment(&self) -> EmploymentStatus {
        self.employment_status.unwrap_or(EmploymentStatus::Unemployed)
    }

    /// Stay duration with the mid-range default applied when the applicant
    /// never answered the duration question.
    pub fn effective_stay_duration(&self) -> StayDuration {
        self.stay_duration.unwrap_or(StayDuration::OneToThreeMonths)
    }

    /// Whether the applicant has traveled abroad, inferring from the visited
    /// country list when the explicit flag was never captured.
    pub fn has_traveled(&self) -> bool {
        self.has_traveled_abroad
            .unwrap_or(!self.visited_countries.is_empty())
    }

    /// Declared monthly income treated as evidence only when positive.
    pub fn has_income_evidence(&self) -> bool {
        self.monthly_income_usd.map(|income| income > 0.0).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_set_tracks_flags() {
        let mut documents = DocumentSet::empty();
        assert!(documents.is_empty());

        documents.insert(DocumentSet::PASSPORT);
        documents.insert(DocumentSet::BANK_STATEMENT);

        assert!(documents.contains(DocumentSet::PASSPORT));
        assert!(documents.contains(DocumentSet::BANK_STATEMENT));
        assert!(!documents.contains(DocumentSet::PROPERTY_DEED));
        assert_eq!(documents.bits(), 0b11);
    }

    #[test]
    fn unknown_document_names_are_rejected() {
        assert_eq!(DocumentSet::flag_for("passport"), Some(DocumentSet::PASSPORT));
        assert_eq!(DocumentSet::flag_for("carnet"), None);
    }

    #[test]
    fn conservative_defaults_apply() {
        let summary = QuestionnaireSummary::missing(VisaType::Tourist, "US", "en");
        assert_eq!(summary.effective_sponsor(), SponsorType::SelfFunded);
        assert_eq!(summary.effective_employment(), EmploymentStatus::Unemployed);
        assert_eq!(
            summary.effective_stay_duration(),
            StayDuration::OneToThreeMonths
        );
        assert!(!summary.has_traveled());
        assert!(!summary.has_income_evidence());
    }

    #[test]
    fn duration_serde_uses_bucket_names() {
        let json = serde_json::to_string(&StayDuration::OneToThreeMonths).expect("serialize");
        assert_eq!(json, "\"1_3_months\"");
        let parsed: StayDuration = serde_json::from_str("\"over_6_months\"").expect("parse");
        assert_eq!(parsed, StayDuration::OverSixMonths);
    }
}
