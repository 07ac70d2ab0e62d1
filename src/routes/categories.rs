use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::forms::categories::{BulkCategoryEntry, CategoryForm};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::categories::{
    create_categories as create_categories_service, create_category as create_category_service,
    delete_category as delete_category_service, get_category as get_category_service,
    list_categories as list_categories_service, search_categories as search_categories_service,
    update_category as update_category_service,
};

#[get("/categories")]
pub async fn list_categories(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_categories_service(repo.get_ref()) {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(err) => error_response(err),
    }
}

#[get("/categories/search/{name}")]
pub async fn search_categories(
    name: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match search_categories_service(&name, repo.get_ref()) {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(err) => error_response(err),
    }
}

#[get("/categories/{id}")]
pub async fn get_category(
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match get_category_service(&id, repo.get_ref()) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(err) => error_response(err),
    }
}

#[post("/categories")]
pub async fn create_category(
    web::Json(form): web::Json<CategoryForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match create_category_service(form.name, repo.get_ref()) {
        Ok(category) => HttpResponse::Created().json(category),
        Err(err) => error_response(err),
    }
}

#[put("/categories/{id}")]
pub async fn update_category(
    id: web::Path<String>,
    web::Json(form): web::Json<CategoryForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match update_category_service(&id, form.name, repo.get_ref()) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(err) => error_response(err),
    }
}

#[delete("/categories/{id}")]
pub async fn delete_category(
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match delete_category_service(&id, repo.get_ref()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

#[post("/categories/multiple")]
pub async fn create_categories(
    web::Json(entries): web::Json<Vec<BulkCategoryEntry>>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let names = entries.into_iter().map(|entry| entry.name).collect();
    match create_categories_service(names, repo.get_ref()) {
        Ok(inserted) => HttpResponse::Created().json(inserted),
        Err(err) => error_response(err),
    }
}
