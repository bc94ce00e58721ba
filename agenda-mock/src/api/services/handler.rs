//! Service and Schedule Block API Handlers

use axum::Json;
use axum::extract::{Path, State};
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Professional, ScheduleBlock, ScheduleBlockCreate, Service, ServiceCreate, ServiceUpdate,
};
use shared::response::ApiResponse;
use shared::util::new_id;

use crate::api::{invalid_field, ok};
use crate::auth::CurrentUser;
use crate::state::{MockData, MockState};

/// GET /professionals/{id}/services/ - active services only
pub async fn list(
    State(state): State<MockState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<Service>>>> {
    let data = state.read().await;
    let services = data
        .professional(&id)?
        .services
        .iter()
        .filter(|s| s.is_active)
        .cloned()
        .collect();
    Ok(ok(services))
}

/// POST /professionals/{id}/services/
pub async fn add_to_professional(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ServiceCreate>,
) -> AppResult<Json<ApiResponse<Service>>> {
    if current.require_professional()? != id {
        return Err(AppError::permission_denied(
            "Cannot edit another professional's services",
        ));
    }
    let mut data = state.write().await;
    Ok(ok(insert_service(&mut data, &id, payload)?))
}

/// POST /services/ - add to the caller's own profile
pub async fn create(
    State(state): State<MockState>,
    current: CurrentUser,
    Json(payload): Json<ServiceCreate>,
) -> AppResult<Json<ApiResponse<Service>>> {
    let professional_id = current.require_professional()?;
    let mut data = state.write().await;
    Ok(ok(insert_service(&mut data, professional_id, payload)?))
}

/// PATCH /services/{id}/
pub async fn update(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ServiceUpdate>,
) -> AppResult<Json<ApiResponse<Service>>> {
    let professional_id = current.require_professional()?;
    if payload.price.is_some_and(|p| p <= Decimal::ZERO) {
        return Err(invalid_field("price", "O preço deve ser positivo"));
    }
    let mut data = state.write().await;
    let service = own_service(data.professional_mut(professional_id)?, &id)?;
    payload.apply(service);
    let updated = service.clone();
    data.professional_mut(professional_id)?.sync_categories();
    Ok(ok(updated))
}

/// DELETE /services/{id}/
pub async fn delete(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let professional_id = current.require_professional()?;
    let mut data = state.write().await;
    let professional = data.professional_mut(professional_id)?;
    let before = professional.services.len();
    professional.services.retain(|s| s.id != id);
    if professional.services.len() == before {
        return Err(AppError::new(ErrorCode::ServiceNotFound));
    }
    professional.sync_categories();
    tracing::info!(service_id = %id, %professional_id, "Service deleted");
    Ok(Json(ApiResponse::ok()))
}

/// GET /professionals/blocks/ - the caller's blocks, earliest first
pub async fn list_blocks(
    State(state): State<MockState>,
    current: CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<ScheduleBlock>>>> {
    let professional_id = current.require_professional()?;
    let data = state.read().await;
    let mut blocks: Vec<ScheduleBlock> = data
        .blocks
        .iter()
        .filter(|b| b.professional_id == professional_id)
        .cloned()
        .collect();
    blocks.sort_by_key(|b| b.start);
    Ok(ok(blocks))
}

/// POST /professionals/blocks/
pub async fn create_block(
    State(state): State<MockState>,
    current: CurrentUser,
    Json(payload): Json<ScheduleBlockCreate>,
) -> AppResult<Json<ApiResponse<ScheduleBlock>>> {
    let professional_id = current.require_professional()?;
    if payload.end <= payload.start {
        return Err(invalid_field("end", "O fim deve ser depois do início"));
    }
    let block = ScheduleBlock {
        id: new_id(),
        professional_id: professional_id.to_string(),
        start: payload.start,
        end: payload.end,
        reason: payload.reason,
    };
    state.write().await.blocks.push(block.clone());
    Ok(ok(block))
}

/// DELETE /professionals/blocks/{id}/
pub async fn delete_block(
    State(state): State<MockState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let professional_id = current.require_professional()?;
    let mut data = state.write().await;
    let before = data.blocks.len();
    data.blocks
        .retain(|b| !(b.id == id && b.professional_id == professional_id));
    if data.blocks.len() == before {
        return Err(AppError::new(ErrorCode::ScheduleBlockNotFound));
    }
    Ok(Json(ApiResponse::ok()))
}

fn insert_service(
    data: &mut MockData,
    professional_id: &str,
    payload: ServiceCreate,
) -> AppResult<Service> {
    if payload.name.trim().is_empty() {
        return Err(invalid_field("name", "Informe o nome do serviço"));
    }
    if payload.price <= Decimal::ZERO {
        return Err(invalid_field("price", "O preço deve ser positivo"));
    }
    if payload.duration_minutes == 0 {
        return Err(invalid_field("duration_minutes", "Informe a duração"));
    }

    let professional = data.professional_mut(professional_id)?;
    let service = Service {
        id: new_id(),
        professional_id: professional_id.to_string(),
        name: payload.name,
        description: payload.description,
        price: payload.price,
        duration_minutes: payload.duration_minutes,
        category: payload.category,
        hair_prices: payload.hair_prices,
        is_active: true,
    };
    professional.services.push(service.clone());
    professional.sync_categories();
    tracing::info!(service_id = %service.id, %professional_id, "Service created");
    Ok(service)
}

fn own_service<'a>(professional: &'a mut Professional, id: &str) -> AppResult<&'a mut Service> {
    professional
        .services
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or_else(|| AppError::new(ErrorCode::ServiceNotFound))
}
