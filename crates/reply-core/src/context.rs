use crate::error::{ReplyError, Result};
use crate::store::{TicketRecord, TicketStore};
use crate::types::{ConversationMessage, SenderRole, TicketConversationContext};

const DEFAULT_DEPARTMENT: &str = "General";
const UNKNOWN_CLIENT: &str = "Unknown";
const CUSTOMER_LABEL: &str = "Customer";

/// Loads a ticket and normalizes it into a [`TicketConversationContext`].
pub struct ContextAssembler<'a> {
    store: &'a dyn TicketStore,
}

impl<'a> ContextAssembler<'a> {
    pub fn new(store: &'a dyn TicketStore) -> Self {
        Self { store }
    }

    pub async fn assemble(&self, ticket_id: u64) -> Result<TicketConversationContext> {
        let ticket = self
            .store
            .load_ticket(ticket_id)
            .await?
            .ok_or(ReplyError::NotFound(ticket_id))?;
        Ok(conversation_from_record(ticket))
    }
}

/// Opening message first, then replies in stored order. Bodies are kept raw.
pub fn conversation_from_record(ticket: TicketRecord) -> TicketConversationContext {
    let client_name = ticket.client.as_ref().map(|client| client.full_name.clone());

    let mut messages = Vec::with_capacity(ticket.replies.len() + 1);
    messages.push(ConversationMessage {
        role: SenderRole::Client,
        author: None,
        body: ticket.message,
        timestamp: ticket.date,
    });

    for reply in ticket.replies {
        let (role, author) = match reply.staff_author() {
            Some(staff) => (SenderRole::Staff, staff.to_string()),
            None => (
                SenderRole::Client,
                client_name
                    .clone()
                    .unwrap_or_else(|| CUSTOMER_LABEL.to_string()),
            ),
        };
        messages.push(ConversationMessage {
            role,
            author: Some(author),
            body: reply.message,
            timestamp: reply.date,
        });
    }

    TicketConversationContext {
        ticket_id: ticket.id,
        subject: ticket.subject,
        department: ticket
            .department
            .filter(|dept| !dept.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DEPARTMENT.to_string()),
        priority: ticket.priority,
        client_name: client_name.unwrap_or_else(|| UNKNOWN_CLIENT.to_string()),
        messages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ClientRecord, InMemoryTicketStore, ReplyRecord};

    fn reply(admin: Option<&str>, message: &str, date: &str) -> ReplyRecord {
        ReplyRecord {
            admin: admin.map(str::to_string),
            message: message.to_string(),
            date: date.to_string(),
        }
    }

    fn ticket(client: Option<&str>) -> TicketRecord {
        TicketRecord {
            id: 42,
            subject: "Email not working".to_string(),
            status: "Open".to_string(),
            priority: "Medium".to_string(),
            department: None,
            client: client.map(|name| ClientRecord {
                full_name: name.to_string(),
            }),
            message: "<p>I cannot send mail.</p>".to_string(),
            date: "2026-03-01 09:00".to_string(),
            replies: vec![
                reply(Some("Alex"), "Which client do you use?", "2026-03-01 09:10"),
                reply(None, "Thunderbird", "2026-03-01 09:20"),
                reply(Some(""), "Still failing", "2026-03-01 09:30"),
            ],
        }
    }

    #[test]
    fn preserves_order_roles_and_raw_bodies() {
        let context = conversation_from_record(ticket(Some("Jane Doe")));

        assert_eq!(context.ticket_id, 42);
        assert_eq!(context.department, "General");
        assert_eq!(context.client_name, "Jane Doe");
        assert_eq!(context.messages.len(), 4);

        let opening = &context.messages[0];
        assert_eq!(opening.role, SenderRole::Client);
        assert_eq!(opening.author, None);
        assert_eq!(opening.body, "<p>I cannot send mail.</p>");

        assert_eq!(context.messages[1].role, SenderRole::Staff);
        assert_eq!(context.messages[1].author.as_deref(), Some("Alex"));
        assert_eq!(context.messages[2].role, SenderRole::Client);
        assert_eq!(context.messages[2].author.as_deref(), Some("Jane Doe"));
        assert_eq!(context.messages[3].role, SenderRole::Client);

        let timestamps: Vec<&str> = context
            .messages
            .iter()
            .map(|m| m.timestamp.as_str())
            .collect();
        assert_eq!(
            timestamps,
            vec!["2026-03-01 09:00", "2026-03-01 09:10", "2026-03-01 09:20", "2026-03-01 09:30"]
        );
    }

    #[test]
    fn missing_client_uses_generic_labels() {
        let context = conversation_from_record(ticket(None));
        assert_eq!(context.client_name, "Unknown");
        assert_eq!(context.messages[2].author.as_deref(), Some("Customer"));
    }

    #[tokio::test]
    async fn unknown_ticket_is_not_found() {
        let store = InMemoryTicketStore::new().with_ticket(ticket(None));
        let assembler = ContextAssembler::new(&store);

        assert!(assembler.assemble(42).await.is_ok());
        assert_eq!(
            assembler.assemble(99).await.unwrap_err(),
            ReplyError::NotFound(99)
        );
    }
}
