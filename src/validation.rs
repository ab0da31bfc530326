use email_address::EmailAddress;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::normalization;
use crate::phone;
use crate::submission::{NewContact, RequestType, SubmissionBody, AFTERNOON_SLOTS, MORNING_SLOTS};

/// Minimum length of the free-text message, in characters.
pub const MIN_MESSAGE_LENGTH: usize = 10;

/// A single field that failed validation, with its user-facing message.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every field-level failure for one submission. Serialized as a list of
/// `(field, message)` pairs, never silently dropped.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_owned(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// The message recorded for a field, if any.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

/// Validates a wire submission and produces the normalized record
/// contents, or every field-level failure at once.
///
/// This is the authoritative pipeline; the form state in `crate::form`
/// runs the same checks client-side for immediate feedback.
pub fn validate(body: SubmissionBody) -> Result<NewContact, ValidationErrors> {
    let body = normalize(body);

    let mut errors = ValidationErrors::default();

    let typedemande = match body.typedemande.as_deref() {
        None => {
            errors.push("typedemande", "Le type de demande est requis");
            String::new()
        }
        Some(value) => match RequestType::parse(value) {
            Some(t) => t.as_str().to_owned(),
            None => {
                errors.push("typedemande", "Le type de demande est invalide");
                String::new()
            }
        },
    };

    let genre = require_text(&mut errors, "genre", body.genre, "Le genre est requis");
    let nom = require_text(&mut errors, "nom", body.nom, "Le nom est requis");
    let prenom = require_text(&mut errors, "prenom", body.prenom, "Le prénom est requis");

    let email = require_text(
        &mut errors,
        "email",
        body.email,
        "L'adresse email est requise",
    );
    if !email.is_empty() && email.parse::<EmailAddress>().is_err() {
        errors.push("email", "L'adresse email est invalide");
    }

    let telephone = match body.telephone {
        None => {
            errors.push("telephone", "Le numéro de téléphone est requis");
            String::new()
        }
        Some(value) => {
            check_telephone(&mut errors, &value);
            value
        }
    };

    let message = match body.message {
        None => {
            errors.push("message", "Le message est requis");
            String::new()
        }
        Some(value) => {
            if value.chars().count() < MIN_MESSAGE_LENGTH {
                errors.push(
                    "message",
                    format!(
                        "Le message doit contenir au moins {} caractères",
                        MIN_MESSAGE_LENGTH
                    ),
                );
            }
            value
        }
    };

    if let Some(date) = body.disponibilite.as_deref() {
        if Date::parse(date, "%Y-%m-%d").is_err() {
            errors.push(
                "disponibilite",
                "La disponibilité doit être au format AAAA-MM-JJ",
            );
        }
    }

    if let Some(heure) = body.heure_debut.as_deref() {
        if !MORNING_SLOTS.contains(&heure) {
            errors.push("heureDebut", "L'heure de début est invalide");
        }
    }

    if let Some(heure) = body.heure_fin.as_deref() {
        if !AFTERNOON_SLOTS.contains(&heure) {
            errors.push("heureFin", "L'heure de fin est invalide");
        }
    }

    // The offered lists are disjoint by time of day, but the ordering
    // constraint must hold for any values that reach this point.
    if let (Some(debut), Some(fin)) = (body.heure_debut.as_deref(), body.heure_fin.as_deref()) {
        if debut >= fin {
            errors.push(
                "heureFin",
                "L'heure de fin doit être postérieure à l'heure de début",
            );
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewContact {
        typedemande,
        genre,
        pronom: body.pronom,
        nom,
        prenom,
        email,
        telephone,
        disponibilite: body.disponibilite,
        heure_debut: body.heure_debut,
        heure_fin: body.heure_fin,
        message,
    })
}

/// Re-normalizes every text field and clears availability for non-visit
/// requests. Applied unconditionally, so availability values a visitor
/// picked before switching request type are dropped here rather than
/// merely hidden by the form.
fn normalize(mut body: SubmissionBody) -> SubmissionBody {
    body.typedemande = normalized(body.typedemande);
    body.genre = normalized(body.genre);
    body.pronom = normalized(body.pronom);
    body.nom = normalized(body.nom);
    body.prenom = normalized(body.prenom);
    body.email = normalized(body.email);
    body.telephone = normalized(body.telephone);
    body.disponibilite = normalized(body.disponibilite);
    body.heure_debut = normalized(body.heure_debut);
    body.heure_fin = normalized(body.heure_fin);
    body.message = normalized(body.message);

    if body.typedemande.as_deref() != Some(RequestType::Visite.as_str()) {
        body.disponibilite = None;
        body.heure_debut = None;
        body.heure_fin = None;
    }

    body
}

fn normalized(value: Option<String>) -> Option<String> {
    value
        .map(normalization::normalize_text)
        .filter(|v| !v.is_empty())
}

fn require_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<String>,
    message: &str,
) -> String {
    match value {
        Some(v) => v,
        None => {
            errors.push(field, message);
            String::new()
        }
    }
}

fn check_telephone(errors: &mut ValidationErrors, value: &str) {
    match phone::resolve(value) {
        Some((code, local)) => {
            let rule = phone::rule_for(code.prefix);

            if !rule.accepts(local) {
                errors.push(
                    "telephone",
                    format!("Le numéro doit contenir {}", rule.phrase()),
                );
            }
        }
        None => errors.push(
            "telephone",
            "Le numéro de téléphone doit être au format international (ex: +33612345678)",
        ),
    }
}
