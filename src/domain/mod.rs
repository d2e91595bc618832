//! Domain layer: strong types with validation and invariants (no I/O).

mod modem;
mod normalize;
mod report;
mod split;
mod validation;
mod value;

pub use modem::{Modem, select_modem};
pub use normalize::{DialPolicy, normalize};
pub use report::SendReport;
pub use split::{MessagePart, split_message};
pub use validation::ValidationError;
pub use value::{DialNumber, MessageText, ModemId, Password, Username};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rejects_empty() {
        assert!(matches!(
            Username::new("   "),
            Err(ValidationError::Empty {
                field: Username::FIELD
            })
        ));
    }

    #[test]
    fn password_rejects_empty() {
        assert!(matches!(
            Password::new(""),
            Err(ValidationError::Empty {
                field: Password::FIELD
            })
        ));
    }

    #[test]
    fn dial_number_uses_the_selected_policy() {
        let international = DialNumber::normalize("0151 234", &DialPolicy::International).unwrap();
        assert_eq!(international.as_str(), "0151234");

        let domestic = DialNumber::normalize(
            "0151 234",
            &DialPolicy::DomesticPrefix {
                country_code: "0049".to_owned(),
            },
        )
        .unwrap();
        assert_eq!(domestic.as_str(), "0049151234");
    }

    #[test]
    fn split_and_normalize_compose_for_a_send() {
        let number = DialNumber::normalize("+49 151 2345678", &DialPolicy::default()).unwrap();
        let parts = split_message("Pump station offline since 04:12, pressure dropping.", 160);
        assert_eq!(number.as_str(), "00491512345678");
        assert_eq!(parts.len(), 1);
    }
}
