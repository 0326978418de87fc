use actix_web::web::{scope, ServiceConfig};
use actix_web::Scope;
use cart::{add_to_cart, get_cart, remove_from_cart};
use library::{
    add_favorite, get_favorites, get_rating, get_watched, mark_watched, rate_movie,
    remove_favorite,
};
use plans::get_plans;
use purchases::{get_purchased, purchase};
use subscriptions::{get_active_plan, get_quota_usage, subscribe};
use users::{get_user, login, register};

mod cart;
mod health_check;
mod library;
mod plans;
mod purchases;
mod subscriptions;
mod users;

use crate::routes::health_check::*;

fn users_routes() -> Scope {
    scope("users")
        .service(register)
        .service(login)
        .service(get_user)
}

fn plans_routes() -> Scope {
    scope("plans").service(get_plans)
}

fn subscriptions_routes() -> Scope {
    scope("subscriptions")
        .service(subscribe)
        .service(get_active_plan)
        .service(get_quota_usage)
}

fn cart_routes() -> Scope {
    scope("cart")
        .service(add_to_cart)
        .service(get_cart)
        .service(remove_from_cart)
}

fn purchases_routes() -> Scope {
    scope("purchases")
        .service(purchase)
        .service(get_purchased)
}

fn favorites_routes() -> Scope {
    scope("favorites")
        .service(add_favorite)
        .service(remove_favorite)
        .service(get_favorites)
}

fn watched_routes() -> Scope {
    scope("watched").service(mark_watched).service(get_watched)
}

fn ratings_routes() -> Scope {
    scope("ratings").service(rate_movie).service(get_rating)
}

pub fn movie_tickets_routes(conf: &mut ServiceConfig) {
    conf.service(health_check).service(
        scope("api/v1")
            .service(users_routes())
            .service(plans_routes())
            .service(subscriptions_routes())
            .service(cart_routes())
            .service(purchases_routes())
            .service(favorites_routes())
            .service(watched_routes())
            .service(ratings_routes()),
    );
}
