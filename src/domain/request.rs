use serde::Serialize;

/// Phone number attached to a billing address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhoneInfo {
    country_code: String,
    number: String,
}

impl PhoneInfo {
    pub fn new(country_code: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
            number: number.into(),
        }
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn number(&self) -> &str {
        &self.number
    }
}

/// Billing section of a tokenisation request.
///
/// Built fresh from the field store at assembly time and never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillingInfo {
    address_line1: String,
    address_line2: String,
    #[serde(rename = "postcode")]
    zip: String,
    country: String,
    city: String,
    state: String,
    phone: PhoneInfo,
}

impl BillingInfo {
    pub fn new(
        address_line1: impl Into<String>,
        address_line2: impl Into<String>,
        zip: impl Into<String>,
        country: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        phone: PhoneInfo,
    ) -> Self {
        Self {
            address_line1: address_line1.into(),
            address_line2: address_line2.into(),
            zip: zip.into(),
            country: country.into(),
            city: city.into(),
            state: state.into(),
            phone,
        }
    }

    pub fn address_line1(&self) -> &str {
        &self.address_line1
    }

    pub fn address_line2(&self) -> &str {
        &self.address_line2
    }

    pub fn zip(&self) -> &str {
        &self.zip
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn phone(&self) -> &PhoneInfo {
        &self.phone
    }
}

/// The payload handed to the caller when the card details page completes.
///
/// One instance per submission attempt. `number` is always digits only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenisationRequest {
    number: String,
    name: String,
    expiry_month: String,
    expiry_year: String,
    cvv: String,
    #[serde(rename = "billing_address", skip_serializing_if = "Option::is_none")]
    billing: Option<BillingInfo>,
}

impl TokenisationRequest {
    pub fn new(
        number: impl Into<String>,
        name: impl Into<String>,
        expiry_month: impl Into<String>,
        expiry_year: impl Into<String>,
        cvv: impl Into<String>,
        billing: Option<BillingInfo>,
    ) -> Self {
        Self {
            number: number.into(),
            name: name.into(),
            expiry_month: expiry_month.into(),
            expiry_year: expiry_year.into(),
            cvv: cvv.into(),
            billing,
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expiry_month(&self) -> &str {
        &self.expiry_month
    }

    pub fn expiry_year(&self) -> &str {
        &self.expiry_year
    }

    pub fn cvv(&self) -> &str {
        &self.cvv
    }

    pub fn billing(&self) -> Option<&BillingInfo> {
        self.billing.as_ref()
    }
}
