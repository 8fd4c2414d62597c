use serde::Deserialize;

use super::repo_types::{AddressPatch, NewAddress};
use crate::error::ApiError;

/// Request body for creating an address. Every field is optional at the
/// parsing stage so that missing ones fail validation, not deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddAddressRequest {
    pub country_code: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub zone: Option<String>,
    pub pin_code: Option<String>,
}

impl AddAddressRequest {
    /// Fails on the first required field that is missing or blank. Values are
    /// kept as submitted except `address2`, which is stored trimmed.
    pub fn validate(self) -> Result<NewAddress, ApiError> {
        let Self {
            country_code,
            first_name,
            last_name,
            phone,
            address1,
            address2,
            city,
            zone,
            pin_code,
        } = self;

        let mut required = [
            country_code,
            first_name,
            last_name,
            phone,
            address1,
            city,
            zone,
            pin_code,
        ]
        .into_iter()
        .map(|field| field.filter(|v| !v.trim().is_empty()));

        let mut next = || {
            required
                .next()
                .flatten()
                .ok_or_else(|| ApiError::BadRequest("All fields are required".into()))
        };

        Ok(NewAddress {
            country_code: next()?,
            first_name: next()?,
            last_name: next()?,
            phone: next()?,
            address1: next()?,
            city: next()?,
            zone: next()?,
            pin_code: next()?,
            address2: address2
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        })
    }
}

/// Request body for editing an address. `user_id` must name the owner.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditAddressRequest {
    pub user_id: Option<String>,
    pub country_code: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub zone: Option<String>,
    pub pin_code: Option<String>,
}

impl EditAddressRequest {
    /// Empty strings count as "not supplied" and never clear a field.
    pub fn into_patch(self) -> AddressPatch {
        fn present(v: Option<String>) -> Option<String> {
            v.filter(|s| !s.is_empty())
        }
        AddressPatch {
            country_code: present(self.country_code),
            first_name: present(self.first_name),
            last_name: present(self.last_name),
            phone: present(self.phone),
            address1: present(self.address1),
            address2: present(self.address2),
            city: present(self.city),
            zone: present(self.zone),
            pin_code: present(self.pin_code),
        }
    }
}
