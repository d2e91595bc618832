use crate::domain::value::DialNumber;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of a fully delivered [`send_message`](crate::RouterClient::send_message) call.
///
/// A partial failure never produces a report; it surfaces as
/// [`RouterError::Send`](crate::RouterError::Send), which carries how many
/// parts had already gone out.
pub struct SendReport {
    /// Number of message parts sent (equals the split count).
    pub parts_used: usize,
    /// Destination in the router's dial format.
    pub normalized_number: DialNumber,
    /// Length of the original message text, in characters.
    pub message_length: usize,
    /// SMS segments the router reports having consumed, summed over parts.
    pub sms_used: u32,
}
