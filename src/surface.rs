//! Caller-facing method list shared by [`crate::CatalogClient`] and
//! [`crate::BlockingCatalogClient`].
//!
//! Each entry names the plain and `*_with_response` methods, the operation id
//! and the positional path parameters (`rust_name: "wireName"`). A trailing
//! `; body` adds a [`crate::Payload`] argument. Both clients expand the same
//! list, so the blocking and async surfaces cannot drift apart.

macro_rules! catalog_operations {
    ($methods:ident) => {
        $methods! {
            /// Creates an entity, or updates it when one with the same unique
            /// attributes exists. The body is an `AtlasEntityWithExtInfo`
            /// document.
            create_or_update, create_or_update_with_response
                => "createOrUpdate" (; body);

            /// Lists entities by GUID. Pass the GUIDs with
            /// [`crate::RequestOptions::guids`].
            list_by_guids, list_by_guids_with_response => "listByGuids" ();

            /// Creates or updates several entities in one call.
            create_or_update_entities, create_or_update_entities_with_response
                => "createOrUpdateEntities" (; body);

            /// Deletes several entities by GUID, passed with
            /// [`crate::RequestOptions::guids`].
            delete_by_guids, delete_by_guids_with_response => "deleteByGuids" ();

            /// Associates one classification with several entities.
            add_classification, add_classification_with_response
                => "addClassification" (; body);

            /// Sets classifications on many entities at once.
            set_classifications, set_classifications_with_response
                => "setClassifications" (; body);

            /// Fetches the complete definition of an entity.
            get_by_guid, get_by_guid_with_response => "getByGuid" (guid: "guid");

            /// Updates a single attribute of an entity. The attribute name is the
            /// `name` query parameter.
            partial_update_entity_attribute_by_guid,
            partial_update_entity_attribute_by_guid_with_response
                => "partialUpdateEntityAttributeByGuid" (guid: "guid"; body);

            /// Deletes an entity.
            delete_by_guid, delete_by_guid_with_response => "deleteByGuid" (guid: "guid");

            /// Fetches the entity header.
            get_header, get_header_with_response => "getHeader" (guid: "guid");

            /// Fetches one classification of an entity.
            get_classification, get_classification_with_response
                => "getClassification" (guid: "guid", classification_name: "classificationName");

            /// Removes one classification from an entity.
            remove_classification, remove_classification_with_response
                => "removeClassification" (guid: "guid", classification_name: "classificationName");

            /// Lists the classifications of an entity.
            get_classifications, get_classifications_with_response
                => "getClassifications" (guid: "guid");

            /// Adds classifications to an entity.
            add_classifications, add_classifications_with_response
                => "addClassifications" (guid: "guid"; body);

            /// Updates classifications of an entity.
            update_classifications, update_classifications_with_response
                => "updateClassifications" (guid: "guid"; body);

            /// Fetches an entity by type and unique attributes, passed with
            /// [`crate::RequestOptions::unique_attribute`].
            get_by_unique_attributes, get_by_unique_attributes_with_response
                => "getByUniqueAttributes" (type_name: "typeName");

            /// Updates an entity selected by type and unique attributes.
            partial_update_entity_by_unique_attributes,
            partial_update_entity_by_unique_attributes_with_response
                => "partialUpdateEntityByUniqueAttributes" (type_name: "typeName"; body);

            /// Deletes an entity selected by type and unique attributes.
            delete_by_unique_attribute, delete_by_unique_attribute_with_response
                => "deleteByUniqueAttribute" (type_name: "typeName");

            /// Removes a classification from an entity selected by unique
            /// attributes.
            remove_classification_by_unique_attribute,
            remove_classification_by_unique_attribute_with_response
                => "removeClassificationByUniqueAttribute"
                (type_name: "typeName", classification_name: "classificationName");

            /// Adds classifications to an entity selected by unique attributes.
            add_classifications_by_unique_attribute,
            add_classifications_by_unique_attribute_with_response
                => "addClassificationsByUniqueAttribute" (type_name: "typeName"; body);

            /// Updates classifications of an entity selected by unique
            /// attributes.
            update_classifications_by_unique_attribute,
            update_classifications_by_unique_attribute_with_response
                => "updateClassificationsByUniqueAttribute" (type_name: "typeName"; body);

            /// Fetches several entities of one type by indexed unique
            /// attributes, passed with
            /// [`crate::RequestOptions::indexed_unique_attribute`].
            get_entities_by_unique_attributes,
            get_entities_by_unique_attributes_with_response
                => "getEntitiesByUniqueAttributes" (type_name: "typeName");
        }
    };
}

macro_rules! optional_body {
    () => {
        None
    };
    ($body:ident) => {
        Some($body)
    };
}

pub(crate) use catalog_operations;
pub(crate) use optional_body;
