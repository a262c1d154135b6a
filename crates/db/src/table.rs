use sea_query::Iden;

#[derive(Iden, Clone, Copy)]
pub enum ContactSubmission {
    Table,
    Id,
    Name,
    Email,
    Subject,
    Message,
    Phone,
    Company,
    IpAddress,
    UserAgent,
    Status,
    Priority,
    Tags,
    EmailSent,
    EmailSentAt,
    AutoReplySent,
    AutoReplySentAt,
    CreatedAt,
    UpdatedAt,
}
