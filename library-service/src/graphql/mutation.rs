use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::{
    author::edit_author_command::EditAuthorCommandInput,
    book::add_book_command::AddBookCommandInput,
    graphql::{
        ServiceDeps, current_user,
        types::{Author, Book, Token, User},
    },
    user::{create_user_command::CreateUserCommandInput, login_command::LoginCommandInput},
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Adds a book, creating its author on first reference.
    ///
    /// Requires an authenticated identity.
    async fn add_book(
        &self,
        ctx: &Context<'_>,
        title: String,
        published: i32,
        author: String,
        #[graphql(default)] genres: Vec<String>,
    ) -> Result<Book> {
        let deps = ctx.data::<ServiceDeps>()?;
        let book = deps
            .add_book_command
            .execute(
                current_user(ctx),
                AddBookCommandInput {
                    title: &title,
                    published,
                    author: &author,
                    genres,
                },
            )
            .await
            .map_err(|err| err.extend())?;
        Ok(book.into())
    }

    /// Sets the birth year of the named author.
    ///
    /// Requires an authenticated identity. Returns null when no author has
    /// that name.
    async fn edit_author(
        &self,
        ctx: &Context<'_>,
        name: String,
        set_to_born: i32,
    ) -> Result<Option<Author>> {
        let deps = ctx.data::<ServiceDeps>()?;
        let author = deps
            .edit_author_command
            .execute(
                current_user(ctx),
                EditAuthorCommandInput {
                    name: &name,
                    set_to_born,
                },
            )
            .await
            .map_err(|err| err.extend())?;
        Ok(author.map(Author::from))
    }

    /// Registers a new user.
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        username: String,
        password: String,
        favorite_genre: Option<String>,
    ) -> Result<User> {
        let deps = ctx.data::<ServiceDeps>()?;
        let user = deps
            .create_user_command
            .execute(CreateUserCommandInput {
                username: &username,
                password: &password,
                favorite_genre: favorite_genre.as_deref(),
            })
            .await
            .map_err(|err| err.extend())?;
        Ok(user.into())
    }

    /// Exchanges credentials for a signed access token.
    ///
    /// Returns null for both unknown usernames and wrong passwords.
    async fn login(
        &self,
        ctx: &Context<'_>,
        username: String,
        password: String,
    ) -> Result<Option<Token>> {
        let deps = ctx.data::<ServiceDeps>()?;
        let token = deps
            .login_command
            .execute(LoginCommandInput {
                username: &username,
                password: &password,
            })
            .await
            .map_err(|err| err.extend())?;
        Ok(token.map(|value| Token { value }))
    }
}
