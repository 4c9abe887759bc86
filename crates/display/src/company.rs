use serde::{Deserialize, Serialize};

/// Kind of account a company entry represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanyType {
    Team,
    Company,
}

/// An entry in the company switcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub logo: String,
    #[serde(rename = "type")]
    pub kind: CompanyType,
}

pub fn company_type_label(kind: CompanyType) -> &'static str {
    match kind {
        CompanyType::Team => "Team Account",
        CompanyType::Company => "Company Account",
    }
}
