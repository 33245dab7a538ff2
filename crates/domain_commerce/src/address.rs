//! Address types

use serde::{Deserialize, Serialize};

/// A billing or shipping address attached to an order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Address {
    pub firstname: String,
    pub lastname: String,
    pub company: Option<String>,
    pub address1: String,
    pub address2: Option<String>,
    pub city: String,
    pub state: Option<String>,
    pub zipcode: String,
    pub country: String,
    pub phone: Option<String>,
}

impl Address {
    /// Creates a new address
    pub fn new(
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        address1: impl Into<String>,
        city: impl Into<String>,
        zipcode: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            firstname: firstname.into(),
            lastname: lastname.into(),
            address1: address1.into(),
            city: city.into(),
            zipcode: zipcode.into(),
            country: country.into(),
            ..Default::default()
        }
    }

    /// Sets the company name
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Sets the state or region
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Sets the contact phone
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// "First Last", skipping whichever half is blank
    pub fn full_name(&self) -> String {
        [self.firstname.trim(), self.lastname.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Company name, if one was entered
    pub fn company_name(&self) -> Option<&str> {
        self.company
            .as_deref()
            .map(str::trim)
            .filter(|company| !company.is_empty())
    }

    /// Formats the street portion on a single line
    pub fn street(&self) -> String {
        match self.address2.as_deref().map(str::trim) {
            Some(line2) if !line2.is_empty() => format!("{}, {}", self.address1, line2),
            _ => self.address1.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_skips_blank_parts() {
        let mut address = Address::new("Grace", "Hopper", "1 Navy Yard", "Arlington", "22202", "US");
        assert_eq!(address.full_name(), "Grace Hopper");

        address.firstname = "  ".to_string();
        assert_eq!(address.full_name(), "Hopper");
    }

    #[test]
    fn test_blank_company_is_ignored() {
        let address = Address::new("Grace", "Hopper", "1 Navy Yard", "Arlington", "22202", "US")
            .with_company("   ");
        assert_eq!(address.company_name(), None);
    }

    #[test]
    fn test_street_joins_second_line() {
        let mut address = Address::new("A", "B", "10 Main St", "Springfield", "12345", "US");
        address.address2 = Some("Suite 4".to_string());
        assert_eq!(address.street(), "10 Main St, Suite 4");
    }
}
