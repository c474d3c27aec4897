//! Wire types exchanged with the backend, mirroring its JSON contract.
//! Ids are opaque strings minted by the server and money amounts stay in
//! their string wire form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::base::date_serde;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ApiSummary {
	pub allow_registration: bool,
	pub build: Build,
	pub demo: bool,
	pub health: bool,
	pub message: String,
	pub title: String,
	pub versions: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Build {
	pub build_time: String,
	pub commit: String,
	pub version: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
	pub attachment_token: String,
	#[serde(with = "date_serde")]
	pub expires_at: DateTime<Utc>,
	pub token: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
	pub username: String,
	pub password: String,
	pub stay_logged_in: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserRegistration {
	pub email: String,
	pub name: String,
	pub password: String,
	pub token: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChangePassword {
	pub current: String,
	#[serde(rename = "new")]
	pub new_password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserOut {
	pub email: String,
	pub group_id: String,
	pub group_name: String,
	pub id: String,
	pub is_owner: bool,
	pub is_superuser: bool,
	pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
	pub email: String,
	pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Group {
	#[serde(with = "date_serde")]
	pub created_at: DateTime<Utc>,
	pub currency: String,
	pub id: String,
	pub name: String,
	#[serde(with = "date_serde")]
	pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GroupUpdate {
	pub currency: String,
	pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GroupStatistics {
	pub total_item_price: f64,
	pub total_items: i64,
	pub total_labels: i64,
	pub total_locations: i64,
	pub total_users: i64,
	pub total_with_warranty: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GroupInvitation {
	#[serde(with = "date_serde")]
	pub expires_at: DateTime<Utc>,
	pub token: String,
	pub uses: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GroupInvitationCreate {
	#[serde(with = "date_serde")]
	pub expires_at: DateTime<Utc>,
	pub uses: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
	pub code: String,
	pub local: String,
	pub name: String,
	pub symbol: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ItemCreate {
	pub description: String,
	pub label_ids: Vec<String>,
	pub location_id: String,
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parent_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdate {
	pub archived: bool,
	pub asset_id: String,
	pub description: String,
	pub fields: Vec<ItemField>,
	pub insured: bool,
	pub label_ids: Vec<String>,
	pub lifetime_warranty: bool,
	pub location_id: String,
	pub manufacturer: String,
	pub model_number: String,
	pub name: String,
	pub notes: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parent_id: Option<String>,
	pub purchase_from: String,
	pub purchase_price: String,
	#[serde(default, with = "date_serde::option")]
	pub purchase_time: Option<DateTime<Utc>>,
	pub quantity: i64,
	pub serial_number: String,
	pub sold_notes: String,
	pub sold_price: String,
	#[serde(default, with = "date_serde::option")]
	pub sold_time: Option<DateTime<Utc>>,
	pub sold_to: String,
	pub warranty_details: String,
	#[serde(default, with = "date_serde::option")]
	pub warranty_expires: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
	pub id: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub quantity: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ItemField {
	pub boolean_value: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	pub name: String,
	pub number_value: i64,
	pub text_value: String,
	#[serde(rename = "type")]
	pub kind: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ItemOut {
	pub archived: bool,
	pub asset_id: String,
	pub attachments: Vec<ItemAttachment>,
	#[serde(with = "date_serde")]
	pub created_at: DateTime<Utc>,
	pub description: String,
	pub fields: Vec<ItemField>,
	pub id: String,
	#[serde(default)]
	pub image_id: Option<String>,
	pub insured: bool,
	pub labels: Vec<LabelSummary>,
	pub lifetime_warranty: bool,
	#[serde(default)]
	pub location: Option<LocationSummary>,
	pub manufacturer: String,
	pub model_number: String,
	pub name: String,
	pub notes: String,
	#[serde(default)]
	pub parent: Option<ItemSummary>,
	pub purchase_from: String,
	pub purchase_price: String,
	#[serde(default, with = "date_serde::option")]
	pub purchase_time: Option<DateTime<Utc>>,
	pub quantity: i64,
	pub serial_number: String,
	pub sold_notes: String,
	pub sold_price: String,
	#[serde(default, with = "date_serde::option")]
	pub sold_time: Option<DateTime<Utc>>,
	pub sold_to: String,
	#[serde(with = "date_serde")]
	pub updated_at: DateTime<Utc>,
	pub warranty_details: String,
	#[serde(default, with = "date_serde::option")]
	pub warranty_expires: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
	pub archived: bool,
	#[serde(with = "date_serde")]
	pub created_at: DateTime<Utc>,
	pub description: String,
	pub id: String,
	#[serde(default)]
	pub image_id: Option<String>,
	pub insured: bool,
	pub labels: Vec<LabelSummary>,
	#[serde(default)]
	pub location: Option<LocationSummary>,
	pub name: String,
	pub purchase_price: String,
	pub quantity: i64,
	#[serde(with = "date_serde")]
	pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ItemPath {
	pub id: String,
	pub name: String,
	#[serde(rename = "type")]
	pub kind: ItemType,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
	Location,
	Item,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ItemAttachment {
	#[serde(with = "date_serde")]
	pub created_at: DateTime<Utc>,
	pub document: DocumentOut,
	pub id: String,
	pub primary: bool,
	#[serde(rename = "type")]
	pub kind: String,
	#[serde(with = "date_serde")]
	pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ItemAttachmentUpdate {
	pub primary: bool,
	pub title: String,
	#[serde(rename = "type")]
	pub kind: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ItemAttachmentToken {
	pub token: String,
}

/// Attachment kinds the backend accepts.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentType {
	Photo,
	Manual,
	Warranty,
	Attachment,
	Receipt,
}

impl AttachmentType {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Photo => "photo",
			Self::Manual => "manual",
			Self::Warranty => "warranty",
			Self::Attachment => "attachment",
			Self::Receipt => "receipt",
		}
	}
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DocumentOut {
	pub id: String,
	pub path: String,
	pub title: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct LabelCreate {
	pub color: String,
	pub description: String,
	pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LabelOut {
	#[serde(with = "date_serde")]
	pub created_at: DateTime<Utc>,
	pub description: String,
	pub id: String,
	pub name: String,
	#[serde(with = "date_serde")]
	pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LabelSummary {
	#[serde(with = "date_serde")]
	pub created_at: DateTime<Utc>,
	pub description: String,
	pub id: String,
	pub name: String,
	#[serde(with = "date_serde")]
	pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct LocationCreate {
	pub description: String,
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parent_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct LocationUpdate {
	pub description: String,
	pub id: String,
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parent_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LocationOut {
	pub children: Vec<LocationSummary>,
	#[serde(with = "date_serde")]
	pub created_at: DateTime<Utc>,
	pub description: String,
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub parent: Option<LocationSummary>,
	#[serde(with = "date_serde")]
	pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LocationOutCount {
	#[serde(with = "date_serde")]
	pub created_at: DateTime<Utc>,
	pub description: String,
	pub id: String,
	pub item_count: i64,
	pub name: String,
	#[serde(with = "date_serde")]
	pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LocationSummary {
	#[serde(with = "date_serde")]
	pub created_at: DateTime<Utc>,
	pub description: String,
	pub id: String,
	pub name: String,
	#[serde(with = "date_serde")]
	pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TreeItem {
	pub children: Vec<TreeItem>,
	pub id: String,
	pub name: String,
	#[serde(rename = "type")]
	pub kind: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceEntry {
	#[serde(default, with = "date_serde::option")]
	pub completed_date: Option<DateTime<Utc>>,
	pub cost: String,
	pub description: String,
	pub id: String,
	pub name: String,
	#[serde(default, with = "date_serde::option")]
	pub scheduled_date: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceEntryCreate {
	#[serde(default, with = "date_serde::option")]
	pub completed_date: Option<DateTime<Utc>>,
	pub cost: String,
	pub description: String,
	pub name: String,
	#[serde(default, with = "date_serde::option")]
	pub scheduled_date: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceEntryUpdate {
	#[serde(default, with = "date_serde::option")]
	pub completed_date: Option<DateTime<Utc>>,
	pub cost: String,
	pub description: String,
	pub name: String,
	#[serde(default, with = "date_serde::option")]
	pub scheduled_date: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceLog {
	pub cost_average: f64,
	pub cost_total: f64,
	pub entries: Vec<MaintenanceEntry>,
	pub item_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NotifierCreate {
	pub is_active: bool,
	pub name: String,
	pub url: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NotifierUpdate {
	pub is_active: bool,
	pub name: String,
	#[serde(default)]
	pub url: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NotifierOut {
	#[serde(with = "date_serde")]
	pub created_at: DateTime<Utc>,
	pub group_id: String,
	pub id: String,
	pub is_active: bool,
	pub name: String,
	#[serde(with = "date_serde")]
	pub updated_at: DateTime<Utc>,
	pub user_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TotalsByOrganizer {
	pub id: String,
	pub name: String,
	pub total: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ValueOverTime {
	pub end: String,
	pub entries: Vec<ValueOverTimeEntry>,
	pub start: String,
	pub value_at_end: f64,
	pub value_at_start: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ValueOverTimeEntry {
	#[serde(with = "date_serde")]
	pub date: DateTime<Utc>,
	pub name: String,
	pub value: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ActionAmountResult {
	pub completed: i64,
}

/// Paged collection responses.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResult<T> {
	pub items: Vec<T>,
	pub page: i64,
	pub page_size: i64,
	pub total: i64,
}

/// Unpaged collection responses.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Results<T> {
	pub items: Vec<T>,
}

/// Single-object responses the backend wraps in `{item}`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Wrapped<T> {
	pub item: T,
}

/// Shape of validation error bodies.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ValidateErrorResponse {
	pub error: String,
	pub fields: String,
}
