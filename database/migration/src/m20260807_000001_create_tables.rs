use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if !manager.has_table("ideas").await? {
            manager
                .create_table(
                    Table::create()
                        .table(Ideas::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Ideas::Id)
                                .string()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Ideas::Title).string().not_null())
                        .col(ColumnDef::new(Ideas::Domain).string().not_null())
                        .col(ColumnDef::new(Ideas::Problem).string().not_null())
                        .col(ColumnDef::new(Ideas::AiSolution).string().not_null())
                        .col(
                            ColumnDef::new(Ideas::Tags)
                                .json_binary()
                                .not_null()
                                .default("[]"),
                        )
                        .col(ColumnDef::new(Ideas::UserId).string().not_null())
                        .col(ColumnDef::new(Ideas::Stage).string().not_null())
                        .col(
                            ColumnDef::new(Ideas::IsVisible)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Ideas::LikeUserIds)
                                .json_binary()
                                .not_null()
                                .default("[]"),
                        )
                        .col(
                            ColumnDef::new(Ideas::CreatedAt)
                                .timestamp()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(Ideas::UpdatedAt)
                                .timestamp()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("ideas_created_at")
                        .table(Ideas::Table)
                        .col(Ideas::CreatedAt)
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("ideas_user_id")
                        .table(Ideas::Table)
                        .col(Ideas::UserId)
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }

        if !manager.has_table("teams").await? {
            manager
                .create_table(
                    Table::create()
                        .table(Teams::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Teams::Id)
                                .string()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Teams::IdeaId).string().not_null())
                        .col(ColumnDef::new(Teams::Name).string().not_null())
                        .col(ColumnDef::new(Teams::Description).string().not_null())
                        .col(ColumnDef::new(Teams::MaxMembers).integer().not_null())
                        .col(ColumnDef::new(Teams::CurrentMembers).integer().not_null())
                        .col(
                            ColumnDef::new(Teams::RequiredSkills)
                                .json_binary()
                                .not_null()
                                .default("[]"),
                        )
                        .col(ColumnDef::new(Teams::LeaderId).string().not_null())
                        .col(ColumnDef::new(Teams::Status).string().not_null())
                        .col(
                            ColumnDef::new(Teams::CreatedAt)
                                .timestamp()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(Teams::UpdatedAt)
                                .timestamp()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("teams_idea_id")
                        .table(Teams::Table)
                        .col(Teams::IdeaId)
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }

        if !manager.has_table("team_members").await? {
            manager
                .create_table(
                    Table::create()
                        .table(TeamMembers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(TeamMembers::Id)
                                .string()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(TeamMembers::TeamId).string().not_null())
                        .col(ColumnDef::new(TeamMembers::UserId).string().not_null())
                        .col(ColumnDef::new(TeamMembers::Role).string().not_null())
                        .col(
                            ColumnDef::new(TeamMembers::Skills)
                                .json_binary()
                                .not_null()
                                .default("[]"),
                        )
                        .col(ColumnDef::new(TeamMembers::Status).string().not_null())
                        .col(
                            ColumnDef::new(TeamMembers::CreatedAt)
                                .timestamp()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            // One membership row per user per team
            manager
                .create_index(
                    Index::create()
                        .name("team_members_team_user")
                        .table(TeamMembers::Table)
                        .col(TeamMembers::TeamId)
                        .col(TeamMembers::UserId)
                        .unique()
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }

        if !manager.has_table("user_tokens").await? {
            manager
                .create_table(
                    Table::create()
                        .table(UserTokens::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(UserTokens::Id)
                                .string()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(UserTokens::UserId).string().not_null())
                        .col(
                            ColumnDef::new(UserTokens::Balance)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(UserTokens::CreatedAt)
                                .timestamp()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(UserTokens::UpdatedAt)
                                .timestamp()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            // One balance row per user
            manager
                .create_index(
                    Index::create()
                        .name("user_tokens_user_id")
                        .table(UserTokens::Table)
                        .col(UserTokens::UserId)
                        .unique()
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }

        if !manager.has_table("token_transactions").await? {
            manager
                .create_table(
                    Table::create()
                        .table(TokenTransactions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(TokenTransactions::Id)
                                .string()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(TokenTransactions::UserId).string().not_null())
                        .col(
                            ColumnDef::new(TokenTransactions::Amount)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(TokenTransactions::TransactionType)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(TokenTransactions::Description).string())
                        .col(ColumnDef::new(TokenTransactions::ReferenceId).string())
                        .col(
                            ColumnDef::new(TokenTransactions::CreatedAt)
                                .timestamp()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            // History reads filter by user and sort by recency
            manager
                .create_index(
                    Index::create()
                        .name("token_transactions_user_created")
                        .table(TokenTransactions::Table)
                        .col(TokenTransactions::UserId)
                        .col(TokenTransactions::CreatedAt)
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }

        if !manager.has_table("idea_investments").await? {
            manager
                .create_table(
                    Table::create()
                        .table(IdeaInvestments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(IdeaInvestments::Id)
                                .string()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(IdeaInvestments::IdeaId).string().not_null())
                        .col(ColumnDef::new(IdeaInvestments::UserId).string().not_null())
                        .col(
                            ColumnDef::new(IdeaInvestments::Amount)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IdeaInvestments::CreatedAt)
                                .timestamp()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            // Repeat investments accumulate on one row per (idea, user)
            manager
                .create_index(
                    Index::create()
                        .name("idea_investments_idea_user")
                        .table(IdeaInvestments::Table)
                        .col(IdeaInvestments::IdeaId)
                        .col(IdeaInvestments::UserId)
                        .unique()
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idea_investments_user_id")
                        .table(IdeaInvestments::Table)
                        .col(IdeaInvestments::UserId)
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order
        manager
            .drop_table(Table::drop().table(IdeaInvestments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(TokenTransactions::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(UserTokens::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(TeamMembers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Teams::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Ideas::Table).to_owned())
            .await?;

        Ok(())
    }
}

// Ideas table
#[derive(Iden)]
enum Ideas {
    Table,
    Id,
    Title,
    Domain,
    Problem,
    AiSolution,
    Tags,
    UserId,
    Stage,
    IsVisible,
    LikeUserIds,
    CreatedAt,
    UpdatedAt,
}

// Teams table
#[derive(Iden)]
enum Teams {
    Table,
    Id,
    IdeaId,
    Name,
    Description,
    MaxMembers,
    CurrentMembers,
    RequiredSkills,
    LeaderId,
    Status,
    CreatedAt,
    UpdatedAt,
}

// Team members table
#[derive(Iden)]
enum TeamMembers {
    Table,
    Id,
    TeamId,
    UserId,
    Role,
    Skills,
    Status,
    CreatedAt,
}

// User token balances table
#[derive(Iden)]
enum UserTokens {
    Table,
    Id,
    UserId,
    Balance,
    CreatedAt,
    UpdatedAt,
}

// Token ledger table
#[derive(Iden)]
enum TokenTransactions {
    Table,
    Id,
    UserId,
    Amount,
    TransactionType,
    Description,
    ReferenceId,
    CreatedAt,
}

// Idea investments table
#[derive(Iden)]
enum IdeaInvestments {
    Table,
    Id,
    IdeaId,
    UserId,
    Amount,
    CreatedAt,
}
