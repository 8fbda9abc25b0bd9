//! Job metadata shared by all document views

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One metadata field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataField {
    // Company (always shown)
    CompanyName,
    CompanyAddress,
    CompanyContact,

    // Sales / general
    SalesOrderNo,
    DeliveryDate,
    CustomerName,
    Contact,
    PreparedBy,
    Remarks,

    // Purchase
    Supplier,
    SupplierAddress,
    ShipDate,
}

impl MetadataField {
    pub const ALL: [MetadataField; 12] = [
        MetadataField::CompanyName,
        MetadataField::CompanyAddress,
        MetadataField::CompanyContact,
        MetadataField::SalesOrderNo,
        MetadataField::DeliveryDate,
        MetadataField::CustomerName,
        MetadataField::Contact,
        MetadataField::PreparedBy,
        MetadataField::Remarks,
        MetadataField::Supplier,
        MetadataField::SupplierAddress,
        MetadataField::ShipDate,
    ];

    /// The three company fields every document starts with
    pub const COMPANY: [MetadataField; 3] = [
        MetadataField::CompanyName,
        MetadataField::CompanyAddress,
        MetadataField::CompanyContact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MetadataField::CompanyName => "本公司名称",
            MetadataField::CompanyAddress => "本公司地址",
            MetadataField::CompanyContact => "本公司联系人",
            MetadataField::SalesOrderNo => "销售单号",
            MetadataField::DeliveryDate => "交期",
            MetadataField::CustomerName => "客户名称",
            MetadataField::Contact => "联系人",
            MetadataField::PreparedBy => "制单人",
            MetadataField::Remarks => "备注",
            MetadataField::Supplier => "采购供应商",
            MetadataField::SupplierAddress => "采购收件地址",
            MetadataField::ShipDate => "采购寄出时间",
        }
    }
}

impl fmt::Display for MetadataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MetadataField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        MetadataField::ALL
            .into_iter()
            .find(|f| f.label() == s)
            .ok_or_else(|| format!("unknown metadata field: {}", s))
    }
}

/// Flat record of string-valued business fields.
///
/// Serialized with the Chinese labels as keys so job files read the same
/// as the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    #[serde(rename = "本公司名称")]
    pub company_name: String,
    #[serde(rename = "本公司地址")]
    pub company_address: String,
    #[serde(rename = "本公司联系人")]
    pub company_contact: String,

    #[serde(rename = "销售单号")]
    pub sales_order_no: String,
    #[serde(rename = "交期")]
    pub delivery_date: String,
    #[serde(rename = "客户名称")]
    pub customer_name: String,
    #[serde(rename = "联系人")]
    pub contact: String,
    #[serde(rename = "制单人")]
    pub prepared_by: String,
    #[serde(rename = "备注")]
    pub remarks: String,

    #[serde(rename = "采购供应商")]
    pub supplier: String,
    #[serde(rename = "采购收件地址")]
    pub supplier_address: String,
    #[serde(rename = "采购寄出时间")]
    pub ship_date: String,
}

impl Metadata {
    pub fn get(&self, field: MetadataField) -> &str {
        match field {
            MetadataField::CompanyName => &self.company_name,
            MetadataField::CompanyAddress => &self.company_address,
            MetadataField::CompanyContact => &self.company_contact,
            MetadataField::SalesOrderNo => &self.sales_order_no,
            MetadataField::DeliveryDate => &self.delivery_date,
            MetadataField::CustomerName => &self.customer_name,
            MetadataField::Contact => &self.contact,
            MetadataField::PreparedBy => &self.prepared_by,
            MetadataField::Remarks => &self.remarks,
            MetadataField::Supplier => &self.supplier,
            MetadataField::SupplierAddress => &self.supplier_address,
            MetadataField::ShipDate => &self.ship_date,
        }
    }

    fn slot_mut(&mut self, field: MetadataField) -> &mut String {
        match field {
            MetadataField::CompanyName => &mut self.company_name,
            MetadataField::CompanyAddress => &mut self.company_address,
            MetadataField::CompanyContact => &mut self.company_contact,
            MetadataField::SalesOrderNo => &mut self.sales_order_no,
            MetadataField::DeliveryDate => &mut self.delivery_date,
            MetadataField::CustomerName => &mut self.customer_name,
            MetadataField::Contact => &mut self.contact,
            MetadataField::PreparedBy => &mut self.prepared_by,
            MetadataField::Remarks => &mut self.remarks,
            MetadataField::Supplier => &mut self.supplier,
            MetadataField::SupplierAddress => &mut self.supplier_address,
            MetadataField::ShipDate => &mut self.ship_date,
        }
    }

    /// A full replacement record with one field changed
    pub fn with(&self, field: MetadataField, value: impl Into<String>) -> Metadata {
        let mut next = self.clone();
        *next.slot_mut(field) = value.into();
        next
    }
}
