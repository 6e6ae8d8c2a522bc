//! Exhibitor registrations, booth pricing, and embedded employees.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Booth sizes offered for exhibition stands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BoothSize {
    Small,
    Medium,
    Large,
    Premium,
}

impl BoothSize {
    /// Booth price in whole currency units, fixed at registration time.
    pub fn price(&self) -> i64 {
        match self {
            Self::Small => 500,
            Self::Medium => 800,
            Self::Large => 1200,
            Self::Premium => 1800,
        }
    }
}

impl std::fmt::Display for BoothSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Small => write!(f, "small"),
            Self::Medium => write!(f, "medium"),
            Self::Large => write!(f, "large"),
            Self::Premium => write!(f, "premium"),
        }
    }
}

impl std::str::FromStr for BoothSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            "premium" => Ok(Self::Premium),
            _ => Err(format!("Unknown booth size: {}", s)),
        }
    }
}

/// Hall number as submitted by clients, who send it as a JSON number
/// (integer or float) or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HallInput {
    Number(i64),
    Float(f64),
    Text(String),
}

impl HallInput {
    /// Resolve to a valid hall number, if it names one of halls 1-3.
    pub fn as_hall(&self) -> Option<i64> {
        let n = match self {
            Self::Number(n) => *n,
            Self::Float(f) if f.fract() == 0.0 => *f as i64,
            Self::Float(_) => return None,
            Self::Text(s) => s.trim().parse().ok()?,
        };
        (1..=3).contains(&n).then_some(n)
    }
}

/// Employee badge record embedded in its exhibitor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub employee_number: String,
}

/// Employee entry as submitted; all fields optional so sparse rows
/// survive deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

impl EmployeeInput {
    /// An entry is empty when every field is blank after trimming.
    fn is_empty(&self) -> bool {
        fn blank(field: &Option<String>) -> bool {
            field.as_deref().map_or(true, |s| s.trim().is_empty())
        }
        blank(&self.name) && blank(&self.email) && blank(&self.phone) && blank(&self.position)
    }
}

/// Assign employee numbers in submitted order, dropping empty entries.
///
/// Numbers are local to one exhibitor: `{exhibitorNumber}-EMP01` onward,
/// 1-indexed by position after the drop.
pub fn number_employees(entries: &[EmployeeInput], exhibitor_number: &str) -> Vec<Employee> {
    entries
        .iter()
        .filter(|entry| !entry.is_empty())
        .enumerate()
        .map(|(index, entry)| Employee {
            name: entry.name.clone().unwrap_or_default().trim().to_string(),
            email: entry.email.clone().unwrap_or_default().trim().to_string(),
            phone: entry.phone.clone().unwrap_or_default().trim().to_string(),
            position: entry.position.clone().unwrap_or_default().trim().to_string(),
            employee_number: format!("{}-EMP{:02}", exhibitor_number, index + 1),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Exhibitor {
    pub id: String,
    pub exhibitor_number: String,
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub website: Option<String>,
    pub industry: String,
    pub booth_size: String,
    pub hall_number: i64,
    pub description: String,
    pub special_requirements: Option<String>,
    /// JSON list of embedded [`Employee`] records
    pub employees: String,
    pub total_amount: i64,
    pub status: String,
    pub registration_date: String,
    pub created_at: String,
}

impl Exhibitor {
    pub fn employee_list(&self) -> Vec<Employee> {
        serde_json::from_str(&self.employees).unwrap_or_default()
    }
}

/// Exhibitor as returned over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExhibitorResponse {
    pub id: String,
    pub exhibitor_number: String,
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub website: Option<String>,
    pub industry: String,
    pub booth_size: String,
    pub hall_number: i64,
    pub description: String,
    pub special_requirements: Option<String>,
    pub employees: Vec<Employee>,
    pub total_amount: i64,
    pub status: String,
    pub registration_date: String,
}

impl From<Exhibitor> for ExhibitorResponse {
    fn from(exhibitor: Exhibitor) -> Self {
        let employees = exhibitor.employee_list();
        Self {
            id: exhibitor.id,
            exhibitor_number: exhibitor.exhibitor_number,
            company_name: exhibitor.company_name,
            contact_person: exhibitor.contact_person,
            email: exhibitor.email,
            phone: exhibitor.phone,
            website: exhibitor.website,
            industry: exhibitor.industry,
            booth_size: exhibitor.booth_size,
            hall_number: exhibitor.hall_number,
            description: exhibitor.description,
            special_requirements: exhibitor.special_requirements,
            employees,
            total_amount: exhibitor.total_amount,
            status: exhibitor.status,
            registration_date: exhibitor.registration_date,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterExhibitorRequest {
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub website: Option<String>,
    pub industry: String,
    pub booth_size: String,
    pub hall_number: HallInput,
    pub description: String,
    #[serde(default)]
    pub special_requirements: Option<String>,
    #[serde(default)]
    pub employees: Vec<EmployeeInput>,
}
