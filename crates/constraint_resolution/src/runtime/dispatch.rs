use grid_types::Grid;
use structure_identification::{StructureParams, StructureType, StructureVariant};
use structure_recognition::{
    BlockPattern, RecognitionError, RecognizedStructure, RunPattern, SpatialConfig, ValueCondition,
    recognize_connected_regions, recognize_spatial_configurations, recognize_value_regions,
};

use crate::config::ResolverConfig;
use crate::domain::RecognitionOutcome;

/// Routes a classified structure type to its recognizer.
///
/// Value types, and connected regions carrying a landmark relation, go to
/// value-region recognition where a path condition outranks adjacency. Plain
/// connected regions are flood filled. Boundary and pattern types scan spatial
/// configurations. A type without a target value finds nothing.
pub fn recognize(grid: &Grid, ty: &StructureType, config: &ResolverConfig) -> RecognitionOutcome {
    let params = &ty.params;
    let result = match ty.variant {
        StructureVariant::Value | StructureVariant::ValueWithAdjacency => {
            value_regions(grid, params, config)
        }
        StructureVariant::ConnectedRegions
            if params.adjacent_to.is_some() || params.path_to_landmarks.is_some() =>
        {
            value_regions(grid, params, config)
        }
        StructureVariant::ConnectedRegions => Ok(params
            .target_value
            .map(|target| {
                recognize_connected_regions(
                    grid,
                    target,
                    params.connectivity.unwrap_or(config.default_connectivity),
                )
            })
            .unwrap_or_default()),
        StructureVariant::Boundary
        | StructureVariant::ColumnPattern
        | StructureVariant::RowPattern
        | StructureVariant::RectangularPattern => {
            recognize_spatial_configurations(grid, &spatial_config(params, config))
        }
    };

    match result {
        Ok(instances) => {
            log::debug!("{} recognized {} instance(s)", ty.name(), instances.len());
            RecognitionOutcome::from_instances(instances)
        }
        Err(err) => {
            log::warn!("recognition of {} failed: {err}", ty.name());
            RecognitionOutcome::Faulted(err.to_string())
        }
    }
}

fn value_regions(
    grid: &Grid,
    params: &StructureParams,
    config: &ResolverConfig,
) -> Result<Vec<RecognizedStructure>, RecognitionError> {
    let Some(target) = params.target_value else {
        return Ok(Vec::new());
    };
    recognize_value_regions(grid, target, &value_condition(params, config))
}

pub(crate) fn value_condition(params: &StructureParams, config: &ResolverConfig) -> ValueCondition {
    let connectivity = params.connectivity.unwrap_or(config.default_connectivity);
    if params.path_to_landmarks.is_some() || params.requires_path_connectivity {
        // adjacency landmarks stand in when the path names none; an empty set faults
        let landmarks = params
            .path_to_landmarks
            .clone()
            .or_else(|| params.adjacent_to.clone())
            .unwrap_or_default();
        log::debug!("path condition to {landmarks:?}");
        ValueCondition::path_to(landmarks, connectivity, params.max_path_length)
    } else if let Some(landmarks) = &params.adjacent_to {
        log::debug!("adjacency condition to {landmarks:?}");
        ValueCondition::adjacent_to(landmarks.clone(), connectivity)
    } else {
        ValueCondition::all_cells()
    }
}

pub(crate) fn spatial_config(params: &StructureParams, config: &ResolverConfig) -> SpatialConfig {
    let Some(target) = params.target_value else {
        return SpatialConfig::default();
    };
    let pattern = params.pattern_type;
    SpatialConfig {
        column: pattern
            .filter(|p| p.includes_columns())
            .map(|_| RunPattern {
                target,
                min_length: params.column_count.unwrap_or(config.min_column_run),
            }),
        row: pattern.filter(|p| p.includes_rows()).map(|_| RunPattern {
            target,
            min_length: params.row_count.unwrap_or(config.min_row_run),
        }),
        block: Some(BlockPattern {
            target,
            min_height: config.min_block_height,
            min_width: config.min_block_width,
        }),
    }
}
