use actix_web::web;

use crate::handlers::blog_posts;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/blog")
            .service(
                web::resource("")
                    .route(web::get().to(blog_posts::get_published_posts))
            )
            .service(
                web::resource("/tags/{tag}")
                    .route(web::get().to(blog_posts::get_posts_by_tag))
            )
            .service(
                web::resource("/{slug}")
                    .route(web::get().to(blog_posts::get_published_post))
            )
    );
}
