use actix_web::web::{self};

pub mod routes {
    pub mod plans;
    pub mod sub;
}

pub mod services {
    pub mod pay;
    pub(crate) mod sub;
}

mod dtos {
    pub(crate) mod pay;
    pub(crate) mod plans;
    pub(crate) mod sub;
}

pub fn mount_plans() -> actix_web::Scope {
    web::scope("/plans")
        .service(routes::plans::get_plans)
        .service(routes::plans::post_quote)
}
pub fn mount_subs() -> actix_web::Scope {
    web::scope("/sub").service(routes::sub::post_subscribe)
}
