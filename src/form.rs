use time::Date;

use crate::phone::{self, CallingCode, CALLING_CODES};
use crate::submission::{RequestType, SubmissionBody, AFTERNOON_SLOTS, MORNING_SLOTS};
use crate::validation::{self, ValidationErrors};

/// Title options offered by the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Title {
    Mr,
    Mrs,
    Unspecified,
    Custom,
}

impl Title {
    /// The display text, which is also the stored value for every
    /// non-custom title.
    pub fn label(&self) -> &'static str {
        match self {
            Title::Mr => "M.",
            Title::Mrs => "Mme",
            Title::Unspecified => "Non précisé",
            Title::Custom => "Personnalisé",
        }
    }
}

/// How a visitor with a custom title wants to be addressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pronoun {
    Homme,
    Femme,
    Autre,
}

impl Pronoun {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pronoun::Homme => "homme",
            Pronoun::Femme => "femme",
            Pronoun::Autre => "autre",
        }
    }
}

/// The form's in-memory values. Every user action consumes the current
/// state and returns the next one; nothing is mutated in place, so each
/// transition can be tested as a plain value-to-value function.
#[derive(Clone, Debug, PartialEq)]
pub struct FormState {
    pub typedemande: Option<RequestType>,
    pub genre: Option<Title>,
    pub genre_personalise: String,
    pub pronom: Option<Pronoun>,
    pub nom: String,
    pub prenom: String,
    pub email: String,
    pub indicatif: &'static CallingCode,
    pub telephone: String,
    pub disponibilite: Option<Date>,
    pub heure_debut: Option<&'static str>,
    pub heure_fin: Option<&'static str>,
    pub message: String,
    pub phone_error: Option<String>,
}

impl Default for FormState {
    /// France is preselected, matching the form's initial state.
    fn default() -> Self {
        FormState {
            typedemande: None,
            genre: None,
            genre_personalise: String::new(),
            pronom: None,
            nom: String::new(),
            prenom: String::new(),
            email: String::new(),
            indicatif: &CALLING_CODES[0],
            telephone: String::new(),
            disponibilite: None,
            heure_debut: None,
            heure_fin: None,
            message: String::new(),
            phone_error: None,
        }
    }
}

impl FormState {
    pub fn with_request_type(self, typedemande: RequestType) -> Self {
        FormState {
            typedemande: Some(typedemande),
            ..self
        }
    }

    /// Selecting a non-custom title also discards any previously chosen
    /// pronoun.
    pub fn with_title(self, genre: Title) -> Self {
        let pronom = match genre {
            Title::Custom => self.pronom,
            _ => None,
        };

        FormState {
            genre: Some(genre),
            pronom,
            ..self
        }
    }

    pub fn with_custom_title(self, label: impl Into<String>) -> Self {
        FormState {
            genre_personalise: label.into(),
            ..self
        }
    }

    pub fn with_pronoun(self, pronom: Pronoun) -> Self {
        FormState {
            pronom: Some(pronom),
            ..self
        }
    }

    pub fn with_nom(self, nom: impl Into<String>) -> Self {
        FormState {
            nom: nom.into(),
            ..self
        }
    }

    pub fn with_prenom(self, prenom: impl Into<String>) -> Self {
        FormState {
            prenom: prenom.into(),
            ..self
        }
    }

    pub fn with_email(self, email: impl Into<String>) -> Self {
        FormState {
            email: email.into(),
            ..self
        }
    }

    pub fn with_message(self, message: impl Into<String>) -> Self {
        FormState {
            message: message.into(),
            ..self
        }
    }

    /// Selecting a country resets the entered number and clears any phone
    /// error: the format rule changed, so the old value no longer means
    /// anything.
    pub fn with_calling_code(self, indicatif: &'static CallingCode) -> Self {
        FormState {
            indicatif,
            telephone: String::new(),
            phone_error: None,
            ..self
        }
    }

    /// Records the entered local number and recomputes the per-country
    /// phone error.
    pub fn with_telephone(self, telephone: impl Into<String>) -> Self {
        let telephone = telephone.into();
        let phone_error = phone_error_for(self.indicatif, &telephone);

        FormState {
            telephone,
            phone_error,
            ..self
        }
    }

    /// Picking a date clears both previously chosen times.
    pub fn with_date(self, disponibilite: Date) -> Self {
        FormState {
            disponibilite: Some(disponibilite),
            heure_debut: None,
            heure_fin: None,
            ..self
        }
    }

    /// Picks a start time. Values outside the morning list, or not
    /// selectable against the chosen end time, leave the state unchanged.
    pub fn with_start_time(self, heure: &str) -> Self {
        match MORNING_SLOTS.iter().find(|s| **s == heure).copied() {
            Some(slot) if self.start_time_selectable(slot) => FormState {
                heure_debut: Some(slot),
                ..self
            },
            _ => self,
        }
    }

    /// Picks an end time, under the same constraints as `with_start_time`.
    pub fn with_end_time(self, heure: &str) -> Self {
        match AFTERNOON_SLOTS.iter().find(|s| **s == heure).copied() {
            Some(slot) if self.end_time_selectable(slot) => FormState {
                heure_fin: Some(slot),
                ..self
            },
            _ => self,
        }
    }

    /// A start time is offered only while it stays before any chosen end
    /// time.
    pub fn start_time_selectable(&self, heure: &str) -> bool {
        match self.heure_fin {
            Some(fin) => heure < fin,
            None => true,
        }
    }

    /// An end time is offered only while it stays after any chosen start
    /// time.
    pub fn end_time_selectable(&self, heure: &str) -> bool {
        match self.heure_debut {
            Some(debut) => heure > debut,
            None => true,
        }
    }

    /// Assembles the wire payload: collapses the title, combines the
    /// local number with its calling code (leading zeros stripped), and
    /// drops availability unless this is a visit request.
    pub fn to_body(&self) -> SubmissionBody {
        let visit = self.typedemande == Some(RequestType::Visite);

        SubmissionBody {
            typedemande: self.typedemande.map(|t| t.as_str().to_owned()),
            genre: self.genre.map(|g| match g {
                Title::Custom => self.genre_personalise.clone(),
                other => other.label().to_owned(),
            }),
            pronom: match self.genre {
                Some(Title::Custom) => self.pronom.map(|p| p.as_str().to_owned()),
                _ => None,
            },
            nom: field(&self.nom),
            prenom: field(&self.prenom),
            email: field(&self.email),
            telephone: field(&self.telephone).map(|local| {
                format!("{}{}", self.indicatif.prefix, local.trim_start_matches('0'))
            }),
            disponibilite: if visit {
                self.disponibilite.map(|d| d.format("%Y-%m-%d"))
            } else {
                None
            },
            heure_debut: if visit {
                self.heure_debut.map(|h| h.to_owned())
            } else {
                None
            },
            heure_fin: if visit {
                self.heure_fin.map(|h| h.to_owned())
            } else {
                None
            },
            message: field(&self.message),
        }
    }

    /// Client-side submit: assembles the payload and runs it through the
    /// same pipeline the server applies. The server stays authoritative;
    /// this only gives the visitor immediate feedback.
    pub fn submit(&self) -> Result<SubmissionBody, ValidationErrors> {
        let body = self.to_body();

        validation::validate(body.clone()).map(|_| body)
    }
}

fn phone_error_for(indicatif: &CallingCode, telephone: &str) -> Option<String> {
    if telephone.is_empty() {
        return None;
    }

    let rule = phone::rule_for(indicatif.prefix);

    if rule.accepts(telephone) {
        None
    } else {
        Some(format!("Le numéro doit contenir {}", rule.phrase()))
    }
}

fn field(value: &str) -> Option<String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_callback_form() -> FormState {
        FormState::default()
            .with_request_type(RequestType::Rappel)
            .with_title(Title::Mr)
            .with_nom("Dupont")
            .with_prenom("Jean")
            .with_email("jean@example.com")
            .with_telephone("0612345678")
            .with_message("Merci de me rappeler svp")
    }

    fn june_15() -> Date {
        Date::try_from_ymd(2024, 6, 15).expect("construct date")
    }

    #[test]
    fn changing_country_resets_the_entered_number_and_error() {
        let state = FormState::default().with_telephone("12345");
        assert_eq!(
            state.phone_error.as_deref(),
            Some("Le numéro doit contenir 9 chiffres")
        );

        let state = state.with_calling_code(phone::find("+44").expect("find UK"));

        assert_eq!(state.telephone, "");
        assert_eq!(state.phone_error, None);
        assert_eq!(state.indicatif.prefix, "+44");
    }

    #[test]
    fn phone_error_follows_the_selected_country() {
        let state = FormState::default()
            .with_calling_code(phone::find("+49").expect("find Germany"))
            .with_telephone("123");

        assert_eq!(
            state.phone_error.as_deref(),
            Some("Le numéro doit contenir 10-11 chiffres")
        );

        let state = state.with_telephone("15123456789");
        assert_eq!(state.phone_error, None);
    }

    #[test]
    fn picking_a_date_clears_both_times() {
        let state = FormState::default()
            .with_request_type(RequestType::Visite)
            .with_date(june_15())
            .with_start_time("09:30")
            .with_end_time("15:00");

        assert_eq!(state.heure_debut, Some("09:30"));
        assert_eq!(state.heure_fin, Some("15:00"));

        let state = state.with_date(Date::try_from_ymd(2024, 6, 16).expect("construct date"));

        assert_eq!(state.heure_debut, None);
        assert_eq!(state.heure_fin, None);
    }

    #[test]
    fn off_list_times_are_ignored() {
        let state = FormState::default().with_start_time("12:00").with_end_time("09:00");

        assert_eq!(state.heure_debut, None);
        assert_eq!(state.heure_fin, None);
    }

    #[test]
    fn selectability_respects_the_ordering_constraint() {
        let state = FormState::default().with_start_time("11:30");

        // all afternoon values stay reachable after the latest morning slot
        for fin in AFTERNOON_SLOTS.iter() {
            assert!(state.end_time_selectable(fin));
        }

        let state = FormState::default().with_end_time("14:00");

        for debut in MORNING_SLOTS.iter() {
            assert!(state.start_time_selectable(debut));
        }

        // an end time at or before a hypothetical start is refused
        assert!(!state.start_time_selectable("14:00"));
        assert!(!state.start_time_selectable("15:00"));
    }

    #[test]
    fn callback_payload_matches_the_wire_shape() {
        let body = filled_callback_form().to_body();

        assert_eq!(body.typedemande.as_deref(), Some("rappel"));
        assert_eq!(body.genre.as_deref(), Some("M."));
        assert_eq!(body.pronom, None);
        assert_eq!(body.nom.as_deref(), Some("Dupont"));
        assert_eq!(body.prenom.as_deref(), Some("Jean"));
        assert_eq!(body.email.as_deref(), Some("jean@example.com"));
        assert_eq!(body.telephone.as_deref(), Some("+33612345678"));
        assert_eq!(body.disponibilite, None);
        assert_eq!(body.heure_debut, None);
        assert_eq!(body.heure_fin, None);
        assert_eq!(body.message.as_deref(), Some("Merci de me rappeler svp"));
    }

    #[test]
    fn leading_zeros_are_stripped_when_combining() {
        let body = filled_callback_form().with_telephone("0061234567").to_body();

        // every leading zero goes, not just the first
        assert_eq!(body.telephone.as_deref(), Some("+3361234567"));
    }

    #[test]
    fn custom_titles_store_the_visitor_wording() {
        let body = filled_callback_form()
            .with_title(Title::Custom)
            .with_custom_title("Maître")
            .with_pronoun(Pronoun::Autre)
            .to_body();

        assert_eq!(body.genre.as_deref(), Some("Maître"));
        assert_eq!(body.pronom.as_deref(), Some("autre"));
    }

    #[test]
    fn leaving_the_custom_title_discards_the_pronoun() {
        let state = filled_callback_form()
            .with_title(Title::Custom)
            .with_pronoun(Pronoun::Femme)
            .with_title(Title::Mrs);

        assert_eq!(state.pronom, None);
        assert_eq!(state.to_body().genre.as_deref(), Some("Mme"));
        assert_eq!(state.to_body().pronom, None);
    }

    #[test]
    fn availability_is_dropped_when_the_request_type_changes() {
        let body = filled_callback_form()
            .with_request_type(RequestType::Visite)
            .with_date(june_15())
            .with_start_time("09:00")
            .with_end_time("14:30")
            .with_request_type(RequestType::Photos)
            .to_body();

        assert_eq!(body.typedemande.as_deref(), Some("photos"));
        assert_eq!(body.disponibilite, None);
        assert_eq!(body.heure_debut, None);
        assert_eq!(body.heure_fin, None);
    }

    #[test]
    fn visit_payload_serializes_date_and_times() {
        let body = filled_callback_form()
            .with_request_type(RequestType::Visite)
            .with_date(june_15())
            .with_start_time("09:00")
            .with_end_time("14:30")
            .to_body();

        assert_eq!(body.disponibilite.as_deref(), Some("2024-06-15"));
        assert_eq!(body.heure_debut.as_deref(), Some("09:00"));
        assert_eq!(body.heure_fin.as_deref(), Some("14:30"));
    }

    #[test]
    fn submit_mirrors_the_server_pipeline() {
        let body = filled_callback_form().submit().expect("submit valid form");
        assert_eq!(body.telephone.as_deref(), Some("+33612345678"));

        let errors = filled_callback_form()
            .with_telephone("12345")
            .submit()
            .expect_err("reject short number");

        assert_eq!(
            errors.message_for("telephone"),
            Some("Le numéro doit contenir 9 chiffres")
        );
    }
}
