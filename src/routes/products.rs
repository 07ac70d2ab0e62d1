use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use serde_json::{Value, json};

use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::products::{
    create_product as create_product_service, create_products as create_products_service,
    delete_product as delete_product_service, get_product as get_product_service,
    list_products as list_products_service,
    list_products_by_category as list_products_by_category_service,
    search_products as search_products_service, update_product as update_product_service,
};

#[get("/products")]
pub async fn list_products(repo: web::Data<DieselRepository>) -> impl Responder {
    match list_products_service(repo.get_ref()) {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(err) => error_response(err),
    }
}

#[get("/products/search/{name}")]
pub async fn search_products(
    name: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match search_products_service(&name, repo.get_ref()) {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(err) => error_response(err),
    }
}

#[get("/products/category/{id}")]
pub async fn list_products_by_category(
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match list_products_by_category_service(&id, repo.get_ref()) {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(err) => error_response(err),
    }
}

#[get("/products/{id}")]
pub async fn get_product(
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match get_product_service(&id, repo.get_ref()) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(err),
    }
}

#[post("/products")]
pub async fn create_product(
    web::Json(body): web::Json<Value>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match create_product_service(body, repo.get_ref()) {
        Ok(product) => HttpResponse::Created().json(product),
        Err(err) => error_response(err),
    }
}

#[put("/products/{id}")]
pub async fn update_product(
    id: web::Path<String>,
    web::Json(body): web::Json<Value>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match update_product_service(&id, body, repo.get_ref()) {
        Ok(()) => HttpResponse::Ok().json(json!({ "message": "Product updated successfully" })),
        Err(err) => error_response(err),
    }
}

#[delete("/products/{id}")]
pub async fn delete_product(
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match delete_product_service(&id, repo.get_ref()) {
        Ok(()) => HttpResponse::Ok().json(json!({ "message": "Product deleted successfully" })),
        Err(err) => error_response(err),
    }
}

#[post("/products/multiple")]
pub async fn create_products(
    web::Json(body): web::Json<Value>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match create_products_service(body, repo.get_ref()) {
        Ok(inserted) => HttpResponse::Created().json(inserted),
        Err(err) => error_response(err),
    }
}
