#[derive(Debug, Clone, PartialEq)]
pub enum CompType<T> {
    Equals(T),
    Gte(T),
    Lte(T),
    Lt(T),
    Gt(T),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PersonsSpecification {
    Id(CompType<i32>),
    Name(CompType<String>),
    Email(CompType<String>),
}

pub trait Specification: Send + 'static {}

impl Specification for PersonsSpecification {}
