use crate::domain::common::BaseAggregate;
use serde::{Deserialize, Serialize};

crate::aggregate_id!(
    /// Уникальный идентификатор поставщика
    VendorId
);

/// Поставщик (продукты, напитки, расходники, сервис)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vendor {
    #[serde(flatten)]
    pub base: BaseAggregate<VendorId>,

    #[serde(rename = "contactPerson")]
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Категория поставок (свободный текст: "Овощи", "Мясо", "Напитки"...)
    pub category: String,
    pub address: Option<String>,
    #[serde(rename = "isActive")]
    pub is_active: bool,
}

impl Vendor {
    pub fn new_for_insert(dto: &VendorDto, code: String) -> Self {
        let mut vendor = Self {
            base: BaseAggregate::new(VendorId::new_v4(), code, String::new()),
            contact_person: None,
            phone: None,
            email: None,
            category: String::new(),
            address: None,
            is_active: true,
        };
        vendor.update(dto);
        vendor
    }

    pub fn update(&mut self, dto: &VendorDto) {
        if let Some(code) = dto.code.as_ref().filter(|c| !c.trim().is_empty()) {
            self.base.code = code.clone();
        }
        self.base.description = dto.description.trim().to_string();
        self.base.comment = dto.comment.clone();
        self.contact_person = dto.contact_person.clone().filter(|v| !v.trim().is_empty());
        self.phone = dto.phone.clone().filter(|v| !v.trim().is_empty());
        self.email = dto.email.clone().filter(|v| !v.trim().is_empty());
        self.category = dto.category.trim().to_string();
        self.address = dto.address.clone().filter(|v| !v.trim().is_empty());
        self.is_active = dto.is_active;
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.is_empty() {
            return Err("Наименование поставщика не может быть пустым".into());
        }
        if let Some(email) = &self.email {
            if !email.contains('@') {
                return Err("Некорректный email".into());
            }
        }
        Ok(())
    }
}

crate::impl_aggregate_root!(Vendor, VendorId, "a003", "vendor", "Поставщик", "Поставщики");

/// DTO для создания/обновления поставщика
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    #[serde(rename = "contactPerson")]
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub category: String,
    pub address: Option<String>,
    #[serde(rename = "isActive")]
    pub is_active: bool,
    pub comment: Option<String>,
}

impl Default for VendorDto {
    fn default() -> Self {
        Self {
            id: None,
            code: None,
            description: String::new(),
            contact_person: None,
            phone: None,
            email: None,
            category: String::new(),
            address: None,
            is_active: true,
            comment: None,
        }
    }
}

impl From<&Vendor> for VendorDto {
    fn from(v: &Vendor) -> Self {
        use crate::domain::common::AggregateId;
        Self {
            id: Some(v.base.id.as_string()),
            code: Some(v.base.code.clone()),
            description: v.base.description.clone(),
            contact_person: v.contact_person.clone(),
            phone: v.phone.clone(),
            email: v.email.clone(),
            category: v.category.clone(),
            address: v.address.clone(),
            is_active: v.is_active,
            comment: v.base.comment.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vendor_requires_name() {
        let vendor = Vendor::new_for_insert(&VendorDto::default(), "VND-001".into());
        assert!(vendor.validate().is_err());

        let vendor = Vendor::new_for_insert(
            &VendorDto {
                description: "Фермерское хозяйство Луч".into(),
                email: Some("order@luch.example".into()),
                ..Default::default()
            },
            "VND-002".into(),
        );
        assert!(vendor.validate().is_ok());
        assert!(vendor.is_active);
    }
}
