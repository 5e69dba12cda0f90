mod persons;
mod repo_trait;
mod unit_of_work;

trait UnitOfWorkInternal {
    fn get_conn(&mut self) -> &mut diesel_async::AsyncPgConnection;
}

pub use persons::PersonsRepo;
pub use repo_trait::Repository;
pub use unit_of_work::{UnitOfWork, UnitOfWorkFactory, UnitOfWorkPublic};
