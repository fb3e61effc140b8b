use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create jobs table
        manager
            .create_table(
                Table::create()
                    .table(Jobs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Jobs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Jobs::UserId).uuid().not_null())
                    .col(ColumnDef::new(Jobs::Domain).string().not_null())
                    .col(ColumnDef::new(Jobs::JobKind).string().not_null())
                    .col(ColumnDef::new(Jobs::Status).string().not_null())
                    .col(ColumnDef::new(Jobs::Months).json().not_null())
                    .col(
                        ColumnDef::new(Jobs::Progress)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Jobs::TotalCitations)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Jobs::ErrorMessage).text())
                    .col(ColumnDef::new(Jobs::RequestedByDomain).string())
                    .col(ColumnDef::new(Jobs::StartedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Jobs::CompletedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Jobs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Jobs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_jobs_user_domain")
                    .table(Jobs::Table)
                    .col(Jobs::UserId)
                    .col(Jobs::Domain)
                    .to_owned(),
            )
            .await?;

        // Create citations table
        manager
            .create_table(
                Table::create()
                    .table(Citations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Citations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Citations::UserId).uuid().not_null())
                    .col(ColumnDef::new(Citations::Domain).string().not_null())
                    .col(ColumnDef::new(Citations::SourceUrl).text().not_null())
                    .col(ColumnDef::new(Citations::SourceDomain).string().not_null())
                    .col(ColumnDef::new(Citations::CitationType).string().not_null())
                    .col(ColumnDef::new(Citations::CitationText).text().not_null())
                    .col(ColumnDef::new(Citations::AnchorText).text())
                    .col(ColumnDef::new(Citations::ContextBefore).text().not_null())
                    .col(ColumnDef::new(Citations::ContextAfter).text().not_null())
                    .col(ColumnDef::new(Citations::Dofollow).boolean())
                    .col(ColumnDef::new(Citations::CrawlDate).date().not_null())
                    .col(
                        ColumnDef::new(Citations::Sentiment)
                            .string()
                            .not_null()
                            .default("neutral"),
                    )
                    .col(ColumnDef::new(Citations::Topics).json().not_null())
                    .col(
                        ColumnDef::new(Citations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Citations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Natural identity: re-discovery merges into the same row
        manager
            .create_index(
                Index::create()
                    .name("uq_citations_identity")
                    .table(Citations::Table)
                    .col(Citations::UserId)
                    .col(Citations::Domain)
                    .col(Citations::SourceUrl)
                    .col(Citations::CitationText)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_citations_domain_date")
                    .table(Citations::Table)
                    .col(Citations::UserId)
                    .col(Citations::Domain)
                    .col(Citations::CrawlDate)
                    .to_owned(),
            )
            .await?;

        // Create crawl_cache table
        manager
            .create_table(
                Table::create()
                    .table(CrawlCache::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CrawlCache::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CrawlCache::Domain).string().not_null())
                    .col(ColumnDef::new(CrawlCache::Month).string().not_null())
                    .col(
                        ColumnDef::new(CrawlCache::RecordsScanned)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CrawlCache::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_crawl_cache_domain_month")
                    .table(CrawlCache::Table)
                    .col(CrawlCache::Domain)
                    .col(CrawlCache::Month)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create citation_scores table
        manager
            .create_table(
                Table::create()
                    .table(CitationScores::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CitationScores::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CitationScores::UserId).uuid().not_null())
                    .col(ColumnDef::new(CitationScores::Domain).string().not_null())
                    .col(ColumnDef::new(CitationScores::Month).string().not_null())
                    .col(
                        ColumnDef::new(CitationScores::TotalCitations)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CitationScores::LinkCount).integer().not_null())
                    .col(
                        ColumnDef::new(CitationScores::MentionCount)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CitationScores::UniqueDomains)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CitationScores::PositiveCount)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CitationScores::NeutralCount)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CitationScores::NegativeCount)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CitationScores::Topics).json().not_null())
                    .col(ColumnDef::new(CitationScores::Score).integer().not_null())
                    .col(
                        ColumnDef::new(CitationScores::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(CitationScores::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_citation_scores_user_domain_month")
                    .table(CitationScores::Table)
                    .col(CitationScores::UserId)
                    .col(CitationScores::Domain)
                    .col(CitationScores::Month)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create monthly_summaries table
        manager
            .create_table(
                Table::create()
                    .table(MonthlySummaries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MonthlySummaries::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MonthlySummaries::UserId).uuid().not_null())
                    .col(ColumnDef::new(MonthlySummaries::Domain).string().not_null())
                    .col(ColumnDef::new(MonthlySummaries::Month).string().not_null())
                    .col(
                        ColumnDef::new(MonthlySummaries::CitationCount)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MonthlySummaries::LinkCount)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MonthlySummaries::MentionCount)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MonthlySummaries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(MonthlySummaries::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_monthly_summaries_user_domain_month")
                    .table(MonthlySummaries::Table)
                    .col(MonthlySummaries::UserId)
                    .col(MonthlySummaries::Domain)
                    .col(MonthlySummaries::Month)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MonthlySummaries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CitationScores::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CrawlCache::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Citations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Jobs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Jobs {
    Table,
    Id,
    UserId,
    Domain,
    JobKind,
    Status,
    Months,
    Progress,
    TotalCitations,
    ErrorMessage,
    RequestedByDomain,
    StartedAt,
    CompletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Citations {
    Table,
    Id,
    UserId,
    Domain,
    SourceUrl,
    SourceDomain,
    CitationType,
    CitationText,
    AnchorText,
    ContextBefore,
    ContextAfter,
    Dofollow,
    CrawlDate,
    Sentiment,
    Topics,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CrawlCache {
    Table,
    Id,
    Domain,
    Month,
    RecordsScanned,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CitationScores {
    Table,
    Id,
    UserId,
    Domain,
    Month,
    TotalCitations,
    LinkCount,
    MentionCount,
    UniqueDomains,
    PositiveCount,
    NeutralCount,
    NegativeCount,
    Topics,
    Score,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum MonthlySummaries {
    Table,
    Id,
    UserId,
    Domain,
    Month,
    CitationCount,
    LinkCount,
    MentionCount,
    CreatedAt,
    UpdatedAt,
}
