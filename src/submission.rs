use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::normalization;

/// Start times offered for a visit, all in the morning.
pub const MORNING_SLOTS: [&str; 6] = ["09:00", "09:30", "10:00", "10:30", "11:00", "11:30"];

/// End times offered for a visit, all in the afternoon.
pub const AFTERNOON_SLOTS: [&str; 6] = ["14:00", "14:30", "15:00", "15:30", "16:00", "16:30"];

/// The kind of request a visitor can make.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub enum RequestType {
    /// An in-person visit; the only kind that carries availability.
    #[serde(rename = "visite")]
    Visite,

    /// A callback.
    #[serde(rename = "rappel")]
    Rappel,

    /// A request for more photos.
    #[serde(rename = "photos")]
    Photos,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::Visite => "visite",
            RequestType::Rappel => "rappel",
            RequestType::Photos => "photos",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "visite" => Some(RequestType::Visite),
            "rappel" => Some(RequestType::Rappel),
            "photos" => Some(RequestType::Photos),
            _ => None,
        }
    }
}

/// A submission as it arrives over the wire, not yet trusted.
///
/// Every text field passes through `normalization` on the way in, and a
/// field that is blank once normalized deserializes as absent.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SubmissionBody {
    #[serde(default, deserialize_with = "normalization::deserialize_option")]
    pub typedemande: Option<String>,

    /// The title as displayed, or the visitor's own wording for custom
    /// titles. Collapsed by the form before submission.
    #[serde(default, deserialize_with = "normalization::deserialize_option")]
    pub genre: Option<String>,

    /// How the visitor wants to be addressed; only sent with custom titles.
    #[serde(default, deserialize_with = "normalization::deserialize_option")]
    pub pronom: Option<String>,

    #[serde(default, deserialize_with = "normalization::deserialize_option")]
    pub nom: Option<String>,

    #[serde(default, deserialize_with = "normalization::deserialize_option")]
    pub prenom: Option<String>,

    #[serde(default, deserialize_with = "normalization::deserialize_option")]
    pub email: Option<String>,

    /// The calling code and local number combined, e.g. `+33612345678`.
    #[serde(default, deserialize_with = "normalization::deserialize_option")]
    pub telephone: Option<String>,

    /// Proposed visit date, `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "normalization::deserialize_option")]
    pub disponibilite: Option<String>,

    #[serde(
        default,
        rename = "heureDebut",
        deserialize_with = "normalization::deserialize_option"
    )]
    pub heure_debut: Option<String>,

    #[serde(
        default,
        rename = "heureFin",
        deserialize_with = "normalization::deserialize_option"
    )]
    pub heure_fin: Option<String>,

    #[serde(default, deserialize_with = "normalization::deserialize_option")]
    pub message: Option<String>,
}

/// A validated, normalized submission ready to be inserted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewContact {
    pub typedemande: String,
    pub genre: String,
    pub pronom: Option<String>,
    pub nom: String,
    pub prenom: String,
    pub email: String,
    pub telephone: String,
    pub disponibilite: Option<String>,
    pub heure_debut: Option<String>,
    pub heure_fin: Option<String>,
    pub message: String,
}

/// A single stored submission. Records are immutable once created; there
/// is no update or delete path.
#[derive(Clone, Debug, Deserialize, Serialize, sqlx::FromRow)]
pub struct Contact {
    /// The ID assigned by the store.
    pub id: Uuid,

    pub typedemande: String,

    pub genre: String,

    pub pronom: Option<String>,

    pub nom: String,

    pub prenom: String,

    pub email: String,

    /// Always starts with one of the selectable calling codes.
    pub telephone: String,

    pub disponibilite: Option<String>,

    #[serde(rename = "heureDebut")]
    pub heure_debut: Option<String>,

    #[serde(rename = "heureFin")]
    pub heure_fin: Option<String>,

    pub message: String,

    /// Assigned by the store at insertion time.
    #[serde(rename = "createdAt", with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
}

impl Contact {
    pub fn new(id: Uuid, created_at: OffsetDateTime, contact: NewContact) -> Self {
        Contact {
            id,
            typedemande: contact.typedemande,
            genre: contact.genre,
            pronom: contact.pronom,
            nom: contact.nom,
            prenom: contact.prenom,
            email: contact.email,
            telephone: contact.telephone,
            disponibilite: contact.disponibilite,
            heure_debut: contact.heure_debut,
            heure_fin: contact.heure_fin,
            message: contact.message,
            created_at,
        }
    }
}
