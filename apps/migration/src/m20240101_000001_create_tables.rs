use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Categories::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Categories::Description).text().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BlogPosts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BlogPosts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BlogPosts::Title).string().not_null())
                    .col(
                        ColumnDef::new(BlogPosts::Slug)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(BlogPosts::Excerpt).text().null())
                    .col(ColumnDef::new(BlogPosts::Content).text().not_null())
                    .col(
                        ColumnDef::new(BlogPosts::Star)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(BlogPosts::Star).gte(0)),
                    )
                    .col(ColumnDef::new(BlogPosts::AuthorId).uuid().not_null())
                    .col(ColumnDef::new(BlogPosts::CategoryId).big_integer().null())
                    .col(
                        ColumnDef::new(BlogPosts::DatePosted)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::DateUpdated)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_posts_category")
                            .from(BlogPosts::Table, BlogPosts::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_blog_posts_slug")
                    .table(BlogPosts::Table)
                    .col(BlogPosts::Slug)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_blog_posts_author")
                    .table(BlogPosts::Table)
                    .col(BlogPosts::AuthorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Comments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Comments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Comments::BlogPostId).big_integer().not_null())
                    .col(ColumnDef::new(Comments::UserId).uuid().not_null())
                    .col(ColumnDef::new(Comments::Content).text().not_null())
                    .col(
                        ColumnDef::new(Comments::DatePosted)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_blog_post")
                            .from(Comments::Table, Comments::BlogPostId)
                            .to(BlogPosts::Table, BlogPosts::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_comments_blog_post")
                    .table(Comments::Table)
                    .col(Comments::BlogPostId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SubComments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubComments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SubComments::CommentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SubComments::UserId).uuid().not_null())
                    .col(ColumnDef::new(SubComments::Content).text().not_null())
                    .col(
                        ColumnDef::new(SubComments::DatePosted)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sub_comments_comment")
                            .from(SubComments::Table, SubComments::CommentId)
                            .to(Comments::Table, Comments::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sub_comments_comment")
                    .table(SubComments::Table)
                    .col(SubComments::CommentId)
                    .to_owned(),
            )
            .await?;

        // One star per (post, user); a racing second insert fails on the key.
        manager
            .create_table(
                Table::create()
                    .table(Stars::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Stars::BlogPostId).big_integer().not_null())
                    .col(ColumnDef::new(Stars::UserId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_stars")
                            .col(Stars::BlogPostId)
                            .col(Stars::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stars_blog_post")
                            .from(Stars::Table, Stars::BlogPostId)
                            .to(BlogPosts::Table, BlogPosts::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Home::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Home::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Home::Title).string().not_null())
                    .col(ColumnDef::new(Home::Description).text().not_null())
                    .col(ColumnDef::new(Home::ImageUrl).string().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Home::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Stars::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SubComments::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Comments::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BlogPosts::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Name,
    Description,
}

#[derive(DeriveIden)]
enum BlogPosts {
    Table,
    Id,
    Title,
    Slug,
    Excerpt,
    Content,
    Star,
    AuthorId,
    CategoryId,
    DatePosted,
    DateUpdated,
}

#[derive(DeriveIden)]
enum Comments {
    Table,
    Id,
    BlogPostId,
    UserId,
    Content,
    DatePosted,
}

#[derive(DeriveIden)]
enum SubComments {
    Table,
    Id,
    CommentId,
    UserId,
    Content,
    DatePosted,
}

#[derive(DeriveIden)]
enum Stars {
    Table,
    BlogPostId,
    UserId,
}

#[derive(DeriveIden)]
enum Home {
    Table,
    Id,
    Title,
    Description,
    ImageUrl,
}
